use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playable grid, excluding the border frame
    pub grid_width: usize,
    /// Height of the playable grid, excluding the border frame
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Maximum length the snake can grow to
    pub max_snake_length: usize,
    /// Points awarded per food eaten
    pub food_score: u32,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Where finished scores are appended
    pub score_file: PathBuf,
    /// How many entries the high score screen lists
    pub high_score_display: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            initial_snake_length: 3,
            max_snake_length: 100,
            food_score: 10,
            tick_interval_ms: 100,
            score_file: PathBuf::from("highscores.txt"),
            high_score_display: 10,
        }
    }
}

impl GameConfig {
    /// Smallest grid side that still leaves room to turn around
    pub const MIN_GRID_SIDE: usize = 4;
    /// Largest grid side the game will lay out and draw
    pub const MAX_GRID_SIDE: usize = 1000;
    /// Largest score awarded for one food
    pub const MAX_FOOD_SCORE: u32 = 1_000_000;

    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations the game cannot start with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= Self::MIN_GRID_SIDE && self.grid_height >= Self::MIN_GRID_SIDE,
            "Grid must be at least {0}x{0}, got {1}x{2}",
            Self::MIN_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= Self::MAX_GRID_SIDE && self.grid_height <= Self::MAX_GRID_SIDE,
            "Grid must be at most {0}x{0}, got {1}x{2}",
            Self::MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.initial_snake_length >= 1,
            "Initial snake length must be at least 1"
        );
        // The snake starts centred and heading right, so its tail extends left of centre.
        ensure!(
            self.initial_snake_length <= self.grid_width / 2 + 1,
            "Initial snake length {} does not fit in a grid {} cells wide",
            self.initial_snake_length,
            self.grid_width
        );
        ensure!(
            self.max_snake_length >= self.initial_snake_length,
            "Maximum snake length {} is below the initial length {}",
            self.max_snake_length,
            self.initial_snake_length
        );
        ensure!(
            self.food_score > 0 && self.food_score <= Self::MAX_FOOD_SCORE,
            "Food score must be between 1 and {}, got {}",
            Self::MAX_FOOD_SCORE,
            self.food_score
        );
        ensure!(self.tick_interval_ms > 0, "Tick interval must be positive");
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
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.max_snake_length, 100);
        assert_eq!(config.food_score, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert!(GameConfig::new(3, 10).validate().is_err());
        assert!(GameConfig::new(10, 2).validate().is_err());
    }

    #[test]
    fn test_rejects_huge_grid() {
        assert!(GameConfig::new(usize::MAX, 20).validate().is_err());
        assert!(GameConfig::new(40, GameConfig::MAX_GRID_SIDE + 1).validate().is_err());
        assert!(
            GameConfig::new(GameConfig::MAX_GRID_SIDE, GameConfig::MAX_GRID_SIDE)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_out_of_range_food_score() {
        let mut config = GameConfig::default();
        config.food_score = 0;
        assert!(config.validate().is_err());

        config.food_score = u32::MAX;
        assert!(config.validate().is_err());

        config.food_score = GameConfig::MAX_FOOD_SCORE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_snake_that_does_not_fit() {
        let mut config = GameConfig::new(6, 6);
        config.initial_snake_length = 5;
        assert!(config.validate().is_err());

        config.initial_snake_length = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_cap_below_initial_length() {
        let mut config = GameConfig::default();
        config.max_snake_length = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 30, "score_file": "scores.txt" }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.score_file, PathBuf::from("scores.txt"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "grid_width = 30").unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());
    }
}
