//! Core value types: positions, directions, configuration, RNG, state.
//!
//! Everything here is a plain value. The transition logic lives in
//! [`rules`](crate::rules).

pub mod position;
pub mod direction;
pub mod rng;
pub mod config;
pub mod state;

pub use position::Position;
pub use direction::Direction;
pub use rng::{GameRng, GameRngState, RandomSource};
pub use config::{
    ConfigError, EngineConfig, FoodPlacement, GameMode, DEFAULT_FOOD_REWARD,
    DEFAULT_MAX_FOOD_ATTEMPTS, MAX_GRID_SIZE, MIN_GRID_SIZE,
};
pub use state::{EmptySnake, GameState, GameStatus};
