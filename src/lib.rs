//! Grid Snake - a tick-based snake engine with a terminal front end
//!
//! This library provides:
//! - Core game logic, free of I/O (game module)
//! - Keyboard decoding (input module)
//! - TUI rendering of engine snapshots (render module)
//! - Play statistics (metrics module)
//! - The interactive terminal host (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
