pub mod human;

pub use human::{HostOptions, HumanMode};
