use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;
use super::geometry::Grid;

/// How self-collision treats the cell the tail is about to leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    /// The current tail cell blocks the head even though it empties this tick
    #[default]
    Collide,
    /// The head may follow directly into the tail when no growth is pending
    Vacate,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Ticks per second at score 0
    pub base_speed: u32,
    /// Upper bound for the tick rate
    pub max_speed: u32,
    /// Score that completes the session, `None` to play until death
    pub win_score: Option<u32>,
    pub tail_policy: TailPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 5,
            grid_height: 10,
            initial_snake_length: 4,
            base_speed: 10,
            max_speed: 25,
            win_score: Some(5),
            tail_policy: TailPolicy::Collide,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Tick rate earned by a score: one step faster every three points
    pub fn speed_for_score(&self, score: u32) -> u32 {
        self.max_speed.min(self.base_speed + score / 3)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        let cells = self.grid().cell_count();
        if self.initial_snake_length >= cells {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                cells,
            });
        }
        if self.base_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.base_speed > self.max_speed {
            return Err(ConfigError::SpeedRange {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        if self.win_score == Some(0) {
            return Err(ConfigError::ZeroWinScore);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 5);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.base_speed, 10);
        assert_eq!(config.max_speed, 25);
        assert_eq!(config.win_score, Some(5));
        assert_eq!(config.tail_policy, TailPolicy::Collide);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.initial_snake_length, 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            GameConfig::new(0, 10).validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));

        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySnake)));

        let config = GameConfig {
            initial_snake_length: 4,
            ..GameConfig::new(2, 2)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeTooLong { length: 4, cells: 4 })
        ));

        let config = GameConfig {
            base_speed: 30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedRange { base: 30, max: 25 })
        ));

        let config = GameConfig {
            base_speed: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSpeed)));

        let config = GameConfig {
            win_score: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWinScore)));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"grid_width": 12, "win_score": null, "tail_policy": "vacate"}}"#
        )
        .unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.win_score, None);
        assert_eq!(config.tail_policy, TailPolicy::Vacate);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            GameConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_))
        ));

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            GameConfig::from_json_file(missing),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_validates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_speed": 40}}"#).unwrap();
        assert!(GameConfig::from_json_file(file.path()).is_err());
    }
}
