//! # snake-engine
//!
//! A deterministic grid snake engine.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: Every tick takes a `GameState` and returns
//!    a new one. Old snapshots stay valid, so callers can diff, log, replay
//!    or rewind for free.
//!
//! 2. **Pure transitions**: The food RNG position travels inside the
//!    snapshot. Same snapshot + same input = same next snapshot.
//!
//! 3. **Caller owns time**: No timers, threads or I/O in the tick path. A UI
//!    loop, network driver or test harness decides when to tick and
//!    serializes input and timer events onto one queue.
//!
//! ## Architecture
//!
//! - **Two boundary policies**: walls end the game, pass-through wraps.
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! - **Bounded food placement**: rejection sampling with a fixed draw cap and
//!   an optional free-cell fallback.
//!
//! ## Modules
//!
//! - `core`: Positions, directions, configuration, RNG, state snapshots
//! - `rules`: `SnakeEngine` and the tick transition
//! - `replay`: Recording, rewind, and binary replay files
//! - `spectate`: Steering policies and the auto-restarting spectator

pub mod core;
pub mod rules;
pub mod replay;
pub mod spectate;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Position, Direction,
    GameMode, FoodPlacement, EngineConfig, ConfigError,
    GameRng, GameRngState, RandomSource,
    EmptySnake, GameState, GameStatus,
};

pub use crate::rules::{CollisionKind, SnakeEngine, TickEvent};

pub use crate::replay::{Replay, ReplayError};

pub use crate::spectate::{Autopilot, Spectator, SpectatorTick, SteeringPolicy, Straight};
