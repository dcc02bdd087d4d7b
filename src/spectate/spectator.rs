//! Self-driving game for watch views.
//!
//! A `Spectator` owns an engine and a running game. Each `tick` asks the
//! steering policy for a direction and advances one step. Once the game is
//! over, the next tick starts a fresh game instead, so a watch view never
//! stalls.

use crate::core::{GameMode, GameState};
use crate::rules::{SnakeEngine, TickEvent};

use super::policy::{Autopilot, SteeringPolicy};

/// Outcome of one spectator tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpectatorTick {
    /// The previous game had ended; a new one was started.
    Restarted,
    /// The current game advanced.
    Advanced(TickEvent),
}

/// Auto-playing, auto-restarting game driver.
#[derive(Clone, Debug)]
pub struct Spectator<P = Autopilot> {
    engine: SnakeEngine,
    policy: P,
    state: GameState,
    games_played: u32,
    best_score: u32,
}

impl Spectator<Autopilot> {
    /// Create a spectator steered by [`Autopilot`].
    pub fn new(engine: SnakeEngine) -> Self {
        Self::with_policy(engine, Autopilot)
    }
}

impl<P: SteeringPolicy> Spectator<P> {
    /// Create a spectator with a custom policy and start the first game.
    pub fn with_policy(mut engine: SnakeEngine, policy: P) -> Self {
        let state = engine.create_initial_state();
        Self {
            engine,
            policy,
            state,
            games_played: 1,
            best_score: 0,
        }
    }

    /// Advance the current game, or start a new one if it is over.
    pub fn tick(&mut self) -> SpectatorTick {
        if self.state.is_game_over {
            self.restart();
            return SpectatorTick::Restarted;
        }

        let direction = self.policy.choose(&self.engine, &self.state);
        let (next, event) = self.engine.step(&self.state, direction);
        self.best_score = self.best_score.max(next.score);
        self.state = next;
        SpectatorTick::Advanced(event)
    }

    /// Switch boundary mode and start a new game under it.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        self.engine.set_game_mode(mode);
        self.restart();
    }

    fn restart(&mut self) {
        log::debug!(
            "Spectator restarting after game {} (score {})",
            self.games_played,
            self.state.score
        );
        self.state = self.engine.create_initial_state();
        self.games_played += 1;
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &SnakeEngine {
        &self.engine
    }

    /// Games started so far, including the current one.
    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Highest score seen across all games.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }
}
