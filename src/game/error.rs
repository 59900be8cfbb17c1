use thiserror::Error;

/// Food placement failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Every cell of the grid is occupied
    #[error("no free cell left on a {width}x{height} grid")]
    ExhaustedGrid { width: usize, height: usize },
}

/// Rejected game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("initial snake length must be non-zero")]
    EmptySnake,
    #[error("initial snake length {length} leaves no room for food on a {cells}-cell grid")]
    SnakeTooLong { length: usize, cells: usize },
    #[error("base speed must be non-zero")]
    ZeroSpeed,
    #[error("base speed {base} exceeds max speed {max}")]
    SpeedRange { base: u32, max: u32 },
    #[error("win score must be non-zero")]
    ZeroWinScore,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
