//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The host drives a [`GameSession`] once per tick and draws the [`Snapshot`] it returns.

pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod geometry;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::{GameConfig, TailPolicy};
pub use direction::Direction;
pub use error::{ConfigError, SpawnError};
pub use food::FoodSpawner;
pub use geometry::{Grid, GridGeometry, Position};
pub use session::{GameSession, Snapshot, StepInfo, TickOutcome};
pub use snake::{CollisionType, SnakeEngine, UpdateOutcome};
