//! Movement directions.
//!
//! Every direction has exactly one opposite (Up/Down, Left/Right). A snake
//! may never turn to the opposite of its current heading in one tick, since
//! its head would land on its own neck.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Direction the snake can move.
///
/// Serialized as `UP`, `DOWN`, `LEFT`, `RIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Headings reachable in one tick: straight on, then the two turns.
    ///
    /// ```
    /// use snake_engine::core::Direction;
    ///
    /// let turns = Direction::Right.turns();
    /// assert_eq!(turns.as_slice(), &[Direction::Right, Direction::Up, Direction::Down]);
    /// ```
    #[must_use]
    pub fn turns(self) -> SmallVec<[Direction; 4]> {
        let mut turns = SmallVec::new();
        turns.push(self);
        turns.extend(
            Self::ALL
                .into_iter()
                .filter(|d| *d != self && !self.is_opposite(*d)),
        );
        turns
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(name)
    }
}
