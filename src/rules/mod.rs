//! The snake rules: state construction, food placement, and the tick.
//!
//! `SnakeEngine` owns the grid size and boundary mode. Snapshots go in, new
//! snapshots come out; the engine never holds on to game state.

pub mod engine;

pub use engine::{CollisionKind, SnakeEngine, TickEvent, INITIAL_SNAKE_LENGTH};
