pub mod renderer;

pub use renderer::{Board, Renderer};
