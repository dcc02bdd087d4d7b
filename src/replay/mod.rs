//! Replay recording, rewind, and binary persistence.
//!
//! A replay captures one game as:
//! - The engine configuration it was played under
//! - The initial snapshot (which carries the food RNG position)
//! - The direction input of every tick
//!
//! Because the tick function is pure and the RNG travels inside the
//! snapshot, those three are enough to rebuild every intermediate snapshot.
//! Only they are written by [`Replay::to_bytes`]; loading re-simulates.
//!
//! In memory the full snapshot history is kept in an `im::Vector`, so
//! spectators can seek and rewind without re-simulating.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ConfigError, Direction, EngineConfig, GameState};
use crate::rules::{SnakeEngine, TickEvent};

/// Binary format version written by [`Replay::to_bytes`].
pub const REPLAY_FORMAT_VERSION: u16 = 1;

/// Errors raised while encoding or decoding a replay.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to encode replay: {0}")]
    Encode(bincode::Error),

    #[error("failed to decode replay: {0}")]
    Decode(bincode::Error),

    #[error("unsupported replay format version {0}")]
    UnsupportedVersion(u16),

    #[error("replay config is invalid: {0}")]
    Config(#[from] ConfigError),

    #[error("initial snapshot is for a {found}x{found} grid, config says {expected}")]
    GridMismatch { expected: u32, found: u32 },

    #[error("initial snapshot has no snake segments")]
    EmptySnake,
}

/// On-disk layout.
#[derive(Serialize, Deserialize)]
struct ReplayFile {
    version: u16,
    config: EngineConfig,
    initial: GameState,
    inputs: Vec<Option<Direction>>,
}

/// A recorded game.
#[derive(Clone, Debug)]
pub struct Replay {
    engine: SnakeEngine,

    /// Direction input of each recorded tick.
    inputs: Vec<Option<Direction>>,

    /// `snapshots[0]` is the initial state, `snapshots[i]` the state after tick `i`.
    snapshots: Vector<GameState>,
}

impl Replay {
    /// Start recording from `initial` under a copy of `engine`.
    ///
    /// Later mode changes on `engine` do not affect the replay.
    #[must_use]
    pub fn start(engine: &SnakeEngine, initial: GameState) -> Self {
        Self {
            engine: engine.clone(),
            inputs: Vec::new(),
            snapshots: Vector::unit(initial),
        }
    }

    /// Start recording under a fresh engine built from `config`.
    pub fn new(config: EngineConfig, initial: GameState) -> Result<Self, ReplayError> {
        let engine = SnakeEngine::new(config)?;
        if initial.grid_size != engine.grid_size() {
            return Err(ReplayError::GridMismatch {
                expected: engine.grid_size(),
                found: initial.grid_size,
            });
        }
        if initial.is_empty() {
            return Err(ReplayError::EmptySnake);
        }
        Ok(Self::start(&engine, initial))
    }

    /// Advance the game one tick and record it.
    pub fn record(&mut self, direction: Option<Direction>) -> TickEvent {
        let (next, event) = self.engine.step(self.current(), direction);
        self.inputs.push(direction);
        self.snapshots.push_back(next);
        event
    }

    // === Access ===

    /// Configuration the game is played under.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    #[must_use]
    pub fn initial(&self) -> &GameState {
        &self.snapshots[0]
    }

    /// Latest snapshot.
    #[must_use]
    pub fn current(&self) -> &GameState {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Number of recorded ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    #[must_use]
    pub fn inputs(&self) -> &[Option<Direction>] {
        &self.inputs
    }

    /// Snapshot after `tick` ticks. Tick 0 is the initial state.
    #[must_use]
    pub fn snapshot_at(&self, tick: usize) -> Option<&GameState> {
        self.snapshots.get(tick)
    }

    /// All snapshots, initial first.
    pub fn snapshots(&self) -> impl Iterator<Item = &GameState> + '_ {
        self.snapshots.iter()
    }

    // === Rewind ===

    /// Drop the last `ticks` ticks and return the snapshot now current.
    ///
    /// Rewinding past the start stops at the initial state.
    pub fn rewind(&mut self, ticks: usize) -> &GameState {
        let keep = self.len().saturating_sub(ticks);
        log::debug!("Rewinding replay from tick {} to {}", self.len(), keep);
        self.inputs.truncate(keep);
        self.snapshots.truncate(keep + 1);
        self.current()
    }

    /// Re-simulate the inputs from the initial state and compare every snapshot.
    #[must_use]
    pub fn verify(&self) -> bool {
        let rebuilt = Self::simulate(&self.engine, self.initial().clone(), &self.inputs);
        rebuilt.snapshots == self.snapshots
    }

    fn simulate(engine: &SnakeEngine, initial: GameState, inputs: &[Option<Direction>]) -> Self {
        let mut replay = Self::start(engine, initial);
        for direction in inputs {
            replay.record(*direction);
        }
        replay
    }

    // === Persistence ===

    /// Encode config, initial snapshot and inputs with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        let file = ReplayFile {
            version: REPLAY_FORMAT_VERSION,
            config: self.config().clone(),
            initial: self.initial().clone(),
            inputs: self.inputs.clone(),
        };
        bincode::serialize(&file).map_err(ReplayError::Encode)
    }

    /// Decode a replay and rebuild its snapshot history.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReplayError> {
        let file: ReplayFile = bincode::deserialize(bytes).map_err(ReplayError::Decode)?;
        if file.version != REPLAY_FORMAT_VERSION {
            return Err(ReplayError::UnsupportedVersion(file.version));
        }

        let replay = Self::new(file.config, file.initial)?;
        let replay = Self::simulate(&replay.engine, replay.initial().clone(), &file.inputs);
        log::debug!(
            "Loaded replay: {} ticks, final score {}",
            replay.len(),
            replay.current().score
        );
        Ok(replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameMode, Position};

    fn engine() -> SnakeEngine {
        SnakeEngine::with_grid(10, GameMode::Walls).unwrap()
    }

    fn recorded(ticks: usize) -> Replay {
        let engine = engine();
        let initial = engine.initial_state_with_seed(3);
        let mut replay = Replay::start(&engine, initial);
        let pattern = [None, Some(Direction::Up), None, Some(Direction::Right)];
        for i in 0..ticks {
            replay.record(pattern[i % pattern.len()]);
        }
        replay
    }

    #[test]
    fn test_record_tracks_snapshots() {
        let replay = recorded(3);

        assert_eq!(replay.len(), 3);
        assert_eq!(replay.snapshots().count(), 4);
        assert_eq!(replay.snapshot_at(0), Some(replay.initial()));
        assert_eq!(replay.snapshot_at(3), Some(replay.current()));
        assert!(replay.snapshot_at(4).is_none());
    }

    #[test]
    fn test_record_returns_event() {
        let engine = engine();
        let initial = GameState::new([Position::new(0, 0)], Position::new(5, 5), Direction::Left, 10);
        let mut replay = Replay::start(&engine, initial);

        let event = replay.record(None);

        assert!(event.is_game_over());
        assert!(replay.current().is_game_over);
    }

    #[test]
    fn test_rewind() {
        let mut replay = recorded(4);
        let after_two = replay.snapshot_at(2).cloned().unwrap();

        let current = replay.rewind(2).clone();

        assert_eq!(current, after_two);
        assert_eq!(replay.len(), 2);
        assert_eq!(replay.inputs().len(), 2);
    }

    #[test]
    fn test_rewind_past_start() {
        let mut replay = recorded(2);
        let initial = replay.initial().clone();

        assert_eq!(replay.rewind(10), &initial);
        assert!(replay.is_empty());
    }

    #[test]
    fn test_rewind_then_branch() {
        let mut replay = recorded(4);
        replay.rewind(1);
        replay.record(Some(Direction::Down));

        assert_eq!(replay.len(), 4);
        assert_eq!(replay.inputs()[3], Some(Direction::Down));
        assert!(replay.verify());
    }

    #[test]
    fn test_verify() {
        assert!(recorded(5).verify());
    }

    #[test]
    fn test_new_rejects_grid_mismatch() {
        let initial = SnakeEngine::with_grid(12, GameMode::Walls)
            .unwrap()
            .initial_state_with_seed(1);

        let err = Replay::new(EngineConfig::new(10, GameMode::Walls), initial).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::GridMismatch {
                expected: 10,
                found: 12
            }
        ));
    }

    #[test]
    fn test_new_rejects_empty_snake() {
        let mut initial = engine().initial_state_with_seed(1);
        initial.snake.clear();

        let err = Replay::new(EngineConfig::new(10, GameMode::Walls), initial).unwrap_err();
        assert!(matches!(err, ReplayError::EmptySnake));
    }

    #[test]
    fn test_bytes_round_trip_rebuilds_history() {
        let replay = recorded(6);

        let bytes = replay.to_bytes().unwrap();
        let loaded = Replay::from_bytes(&bytes).unwrap();

        assert_eq!(loaded.inputs(), replay.inputs());
        assert_eq!(loaded.config(), replay.config());
        assert!(loaded.snapshots().eq(replay.snapshots()));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = Replay::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ReplayError::Decode(_)));
    }
}
