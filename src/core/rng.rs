//! Deterministic random number generation for food placement.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Each new game gets its own branch of the session seed
//! - **Serializable**: O(1) state capture and restore, so a snapshot can
//!   carry its RNG position and stay a plain value
//! - **Pluggable**: food placement only needs a [`RandomSource`]
//!
//! ## Usage
//!
//! ```
//! use snake_engine::core::GameRng;
//!
//! let mut session = GameRng::new(42);
//!
//! // Fork one branch per game
//! let mut first = session.fork();
//! let mut second = session.fork();
//! let a: Vec<i32> = (0..8).map(|_| first.gen_range(0..1000)).collect();
//! let b: Vec<i32> = (0..8).map(|_| second.gen_range(0..1000)).collect();
//! assert_ne!(a, b);
//!
//! // Forks are deterministic: same fork counter, same sequence
//! let mut again = GameRng::new(42).fork();
//! let c: Vec<i32> = (0..8).map(|_| again.gen_range(0..1000)).collect();
//! assert_eq!(a, c);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of random grid coordinates.
///
/// Food placement draws through this trait so tests can substitute a
/// scripted sequence.
pub trait RandomSource {
    /// Draw a uniformly distributed integer in `[0, upper)`.
    fn gen_coord(&mut self, upper: i32) -> i32;

    /// Draw a uniformly distributed index in `[0, len)`. `len` is non-zero.
    fn gen_index(&mut self, len: usize) -> usize;
}

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn gen_coord(&mut self, upper: i32) -> i32 {
        self.gen_range(0..upper)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state for snapshots.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

impl GameRngState {
    /// State of a freshly seeded RNG.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        GameRng::new(seed).state()
    }
}
