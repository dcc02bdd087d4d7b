//! Engine configuration.
//!
//! - `GameMode`: Boundary policy (walls kill, or the board wraps)
//! - `FoodPlacement`: What to do when random food draws keep landing on the snake
//! - `EngineConfig`: Everything fixed for the life of a game
//!
//! Configs can be built in code with the `with_*` methods or loaded from TOML.
//! Missing TOML keys fall back to their defaults.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid that fits the three-segment starting snake plus food.
pub const MIN_GRID_SIZE: u32 = 4;

/// Largest grid whose cell count still fits in an `i32`.
pub const MAX_GRID_SIZE: u32 = 46_340;

/// Points awarded per food in the classic scoring policy.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Rejection-sampling cap for food placement.
pub const DEFAULT_MAX_FOOD_ATTEMPTS: u32 = 100;

/// Errors raised while building or loading an [`EngineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid size {size} is too small, need at least {min}")]
    GridTooSmall { size: u32, min: u32 },

    #[error("grid size {size} is too large, at most {max} supported")]
    GridTooLarge { size: u32, max: u32 },

    #[error("max_food_attempts must be at least 1")]
    ZeroFoodAttempts,

    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Boundary policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Leaving the grid ends the game.
    #[default]
    Walls,
    /// Leaving one edge re-enters from the opposite edge.
    PassThrough,
}

impl GameMode {
    /// Wire name, as used by the leaderboard and session services.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Walls => "walls",
            GameMode::PassThrough => "pass-through",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walls" => Ok(GameMode::Walls),
            "pass-through" => Ok(GameMode::PassThrough),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Food placement policy once the sampling cap is exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Accept the last draw even if it lands on the snake.
    ///
    /// Bounded time, but on a nearly full board food can appear under
    /// the body.
    #[default]
    Sampling,
    /// Enumerate the free cells and pick one uniformly.
    ///
    /// Only a completely full board falls back to the last draw.
    FreeCellFallback,
}

/// Configuration for a [`SnakeEngine`](crate::rules::SnakeEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length of the square grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,

    /// Boundary policy.
    #[serde(default)]
    pub mode: GameMode,

    /// Score added per food eaten.
    #[serde(default = "default_food_reward")]
    pub food_reward: u32,

    /// Random draws before the food placement policy gives up.
    #[serde(default = "default_max_food_attempts")]
    pub max_food_attempts: u32,

    #[serde(default)]
    pub food_placement: FoodPlacement,

    /// Session seed. Each new game forks its own stream from it.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_grid_size() -> u32 {
    20
}

fn default_food_reward() -> u32 {
    DEFAULT_FOOD_REWARD
}

fn default_max_food_attempts() -> u32 {
    DEFAULT_MAX_FOOD_ATTEMPTS
}

fn default_seed() -> u64 {
    42
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            mode: GameMode::default(),
            food_reward: default_food_reward(),
            max_food_attempts: default_max_food_attempts(),
            food_placement: FoodPlacement::default(),
            seed: default_seed(),
        }
    }
}

impl EngineConfig {
    /// Create a config with the given grid size and mode.
    pub fn new(grid_size: u32, mode: GameMode) -> Self {
        Self {
            grid_size,
            mode,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_food_reward(mut self, reward: u32) -> Self {
        self.food_reward = reward;
        self
    }

    #[must_use]
    pub fn with_max_food_attempts(mut self, attempts: u32) -> Self {
        self.max_food_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_food_placement(mut self, placement: FoodPlacement) -> Self {
        self.food_placement = placement;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the construction-time preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.max_food_attempts == 0 {
            return Err(ConfigError::ZeroFoodAttempts);
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to defaults on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.mode, GameMode::Walls);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.max_food_attempts, 100);
        assert_eq!(config.food_placement, FoodPlacement::Sampling);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(12, GameMode::PassThrough)
            .with_food_reward(5)
            .with_seed(7)
            .with_food_placement(FoodPlacement::FreeCellFallback);

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.mode, GameMode::PassThrough);
        assert_eq!(config.food_reward, 5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.food_placement, FoodPlacement::FreeCellFallback);
    }

    #[test]
    fn test_validate_rejects_small_grid() {
        let err = EngineConfig::default().with_grid_size(3).validate().unwrap_err();
        assert!(matches!(err, ConfigError::GridTooSmall { size: 3, min: 4 }));
        assert!(EngineConfig::default().with_grid_size(4).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_huge_grid() {
        let err = EngineConfig::default()
            .with_grid_size(MAX_GRID_SIZE + 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::GridTooLarge { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let err = EngineConfig::default()
            .with_max_food_attempts(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroFoodAttempts));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::Walls.to_string(), "walls");
        assert_eq!(GameMode::PassThrough.to_string(), "pass-through");
        assert_eq!("pass-through".parse::<GameMode>().unwrap(), GameMode::PassThrough);
        assert!(matches!(
            "wrap".parse::<GameMode>(),
            Err(ConfigError::UnknownMode(m)) if m == "wrap"
        ));

        let json = serde_json::to_string(&GameMode::PassThrough).unwrap();
        assert_eq!(json, r#""pass-through""#);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = EngineConfig::from_toml_str(
            r#"
            grid_size = 30
            mode = "pass-through"
        "#,
        )
        .unwrap();

        assert_eq!(config.grid_size, 30);
        assert_eq!(config.mode, GameMode::PassThrough);
        // Other fields use defaults
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.max_food_attempts, 100);
    }

    #[test]
    fn test_config_deserialize_full() {
        let config = EngineConfig::from_toml_str(
            r#"
            grid_size = 8
            mode = "walls"
            food_reward = 1
            max_food_attempts = 5
            food_placement = "free-cell-fallback"
            seed = 99
        "#,
        )
        .unwrap();

        assert_eq!(
            config,
            EngineConfig::new(8, GameMode::Walls)
                .with_food_reward(1)
                .with_max_food_attempts(5)
                .with_food_placement(FoodPlacement::FreeCellFallback)
                .with_seed(99)
        );
    }

    #[test]
    fn test_from_toml_validates() {
        let err = EngineConfig::from_toml_str("grid_size = 2").unwrap_err();
        assert!(matches!(err, ConfigError::GridTooSmall { .. }));

        let err = EngineConfig::from_toml_str("grid_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = EngineConfig::load_or_default("/nonexistent/snake-engine.toml");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "snake-engine-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "grid_size = 16\nseed = 3\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.grid_size, 16);
        assert_eq!(config.seed, 3);
    }
}
