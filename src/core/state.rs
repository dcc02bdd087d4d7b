//! Game state snapshots.
//!
//! A `GameState` is an immutable value describing the game at one tick
//! boundary. The engine never mutates a snapshot: every transition returns a
//! new one, so callers can diff, log, or roll back by keeping old values.
//!
//! ## Cheap copies
//!
//! The snake body is an `im::Vector`, so cloning a snapshot is O(1) and
//! consecutive snapshots share most of their body segments. Replay history
//! relies on this.
//!
//! ## Pause
//!
//! Pausing is owned by the caller, not by the engine's transition function.
//! [`GameState::toggle_pause`] and friends are convenience constructors for
//! the paused/resumed snapshot; they never touch snake, food or score.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::direction::Direction;
use super::position::Position;
use super::rng::GameRngState;

/// Coarse lifecycle of a snapshot.
///
/// `GameOver` is absorbing. `Paused` only returns to `Running` through the
/// caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// A decoded snapshot had no snake segments.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("snake must have at least 1 segment")]
pub struct EmptySnake;

/// Complete game state at one tick boundary.
///
/// Deserialization rejects an empty snake with [`EmptySnake`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGameState")]
pub struct GameState {
    /// Body segments, head first, tail last. Never empty.
    pub snake: Vector<Position>,

    /// Current food cell.
    pub food: Position,

    /// Heading used by the last tick.
    pub direction: Direction,

    pub score: u32,

    pub is_game_over: bool,

    pub is_paused: bool,

    /// Grid the snapshot belongs to.
    pub grid_size: u32,

    /// Ticks that moved the snake.
    pub ticks: u32,

    /// Position of the food RNG stream.
    pub rng: GameRngState,
}

/// Wire layout of [`GameState`] before the segment check.
#[derive(Deserialize)]
struct UncheckedGameState {
    snake: Vector<Position>,
    food: Position,
    direction: Direction,
    score: u32,
    is_game_over: bool,
    is_paused: bool,
    grid_size: u32,
    ticks: u32,
    rng: GameRngState,
}

impl TryFrom<UncheckedGameState> for GameState {
    type Error = EmptySnake;

    fn try_from(raw: UncheckedGameState) -> Result<Self, Self::Error> {
        if raw.snake.is_empty() {
            return Err(EmptySnake);
        }
        Ok(Self {
            snake: raw.snake,
            food: raw.food,
            direction: raw.direction,
            score: raw.score,
            is_game_over: raw.is_game_over,
            is_paused: raw.is_paused,
            grid_size: raw.grid_size,
            ticks: raw.ticks,
            rng: raw.rng,
        })
    }
}

impl GameState {
    /// Create a running snapshot with score 0.
    ///
    /// Segments are taken head first. The RNG stream is seeded with 0; use
    /// [`with_rng`](Self::with_rng) to pick another.
    ///
    /// # Panics
    ///
    /// Panics if `snake` yields no segments.
    #[must_use]
    pub fn new(
        snake: impl IntoIterator<Item = Position>,
        food: Position,
        direction: Direction,
        grid_size: u32,
    ) -> Self {
        let snake: Vector<Position> = snake.into_iter().collect();
        assert!(!snake.is_empty(), "Snake must have at least 1 segment");

        Self {
            snake,
            food,
            direction,
            score: 0,
            is_game_over: false,
            is_paused: false,
            grid_size,
            ticks: 0,
            rng: GameRngState::seeded(0),
        }
    }

    /// Replace the RNG stream.
    #[must_use]
    pub fn with_rng(mut self, rng: GameRngState) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the food cell.
    #[must_use]
    pub fn with_food(mut self, food: Position) -> Self {
        self.food = food;
        self
    }

    /// Replace the score.
    #[must_use]
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    // === Snake ===

    /// Head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // Non-empty by construction.
        self.snake[0]
    }

    /// Tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.snake[self.snake.len() - 1]
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Never true for a valid snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Segments after the head.
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.snake.iter().skip(1)
    }

    /// Check if a position is occupied by any segment.
    #[must_use]
    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    // === Lifecycle ===

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.is_game_over {
            GameStatus::GameOver
        } else if self.is_paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    /// Paused copy of this snapshot. Game over snapshots are returned as is.
    #[must_use]
    pub fn paused(&self) -> Self {
        self.with_pause_flag(true)
    }

    /// Resumed copy of this snapshot. Game over snapshots are returned as is.
    #[must_use]
    pub fn resumed(&self) -> Self {
        self.with_pause_flag(false)
    }

    /// Flip the pause flag.
    #[must_use]
    pub fn toggle_pause(&self) -> Self {
        self.with_pause_flag(!self.is_paused)
    }

    fn with_pause_flag(&self, is_paused: bool) -> Self {
        if self.is_game_over {
            return self.clone();
        }
        Self {
            is_paused,
            ..self.clone()
        }
    }
}
