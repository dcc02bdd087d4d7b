//! Grid coordinates.
//!
//! ## Position
//!
//! Integer `(x, y)` pair. `x` grows to the right, `y` grows downward, so
//! `Direction::Up` decrements `y`.
//!
//! Coordinates are signed. In walls mode a step off the board
//! produces `-1` or `n`, and collision detection is what rejects it.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta.
    #[must_use]
    pub const fn moved_by(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction. No wrapping.
    #[must_use]
    pub const fn moved_in_direction(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Wrap both coordinates into `[0, grid_size)`.
    ///
    /// ```
    /// use snake_engine::core::Position;
    ///
    /// assert_eq!(Position::new(-1, 10).wrapped(20), Position::new(19, 10));
    /// assert_eq!(Position::new(20, 20).wrapped(20), Position::new(0, 0));
    /// ```
    #[must_use]
    pub fn wrapped(self, grid_size: u32) -> Self {
        let n = grid_size as i32;
        Self {
            x: self.x.rem_euclid(n),
            y: self.y.rem_euclid(n),
        }
    }

    /// Check whether the position lies on an `n x n` grid.
    #[must_use]
    pub fn is_within(self, grid_size: u32) -> bool {
        let n = grid_size as i32;
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Manhattan distance on a torus of side `grid_size`.
    ///
    /// Each axis takes the shorter of the direct and the wrapped route.
    #[must_use]
    pub fn wrapped_manhattan(self, other: Position, grid_size: u32) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.min(grid_size.saturating_sub(dx)) + dy.min(grid_size.saturating_sub(dy))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
