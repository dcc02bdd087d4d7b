//! The snake engine: initial state, food placement, and the tick transition.
//!
//! All operations are pure with respect to the snapshot they receive. The
//! only mutable engine state is the boundary mode (reconfigured between
//! games) and the session RNG that seeds each new game.
//!
//! ## Tick order
//!
//! 1. Paused or finished snapshots are returned unchanged.
//! 2. The requested direction is applied unless it reverses the snake.
//! 3. The candidate head is computed (wrapped in pass-through mode).
//! 4. Collisions are checked against the pre-move body, before anything moves.
//! 5. The head is prepended; the tail is dropped unless food was eaten.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{
    ConfigError, Direction, EngineConfig, FoodPlacement, GameMode, GameRng, GameState,
    Position, RandomSource,
};

/// Length of the snake at the start of every game.
pub const INITIAL_SNAKE_LENGTH: i32 = 3;

/// What the head ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Left the grid in walls mode.
    Wall,
    /// Hit one of its own segments.
    SelfCollision,
}

/// Report of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// Snapshot was paused or already over; nothing happened.
    Idle,
    /// Snake advanced one cell.
    Moved,
    /// Snake advanced onto food and grew.
    Ate { at: Position, reward: u32 },
    /// Candidate head collided; the game is over.
    Collided(CollisionKind),
}

impl TickEvent {
    /// Check if this tick ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickEvent::Collided(_))
    }
}

/// Grid snake engine.
///
/// ## Example
///
/// ```
/// use snake_engine::core::{Direction, GameMode, Position};
/// use snake_engine::rules::SnakeEngine;
///
/// let mut engine = SnakeEngine::with_grid(20, GameMode::Walls).unwrap();
/// let state = engine.create_initial_state();
/// assert_eq!(state.head(), Position::new(10, 10));
///
/// let next = engine.move_snake(&state, Some(Direction::Down));
/// assert_eq!(next.head(), Position::new(10, 11));
/// assert!(!next.is_game_over);
/// ```
#[derive(Clone, Debug)]
pub struct SnakeEngine {
    config: EngineConfig,
    session_rng: GameRng,
}

impl SnakeEngine {
    /// Create an engine from a validated config.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session_rng = GameRng::new(config.seed);
        Ok(Self {
            config,
            session_rng,
        })
    }

    /// Create an engine with default scoring for the given grid and mode.
    pub fn with_grid(grid_size: u32, mode: GameMode) -> Result<Self, ConfigError> {
        Self::new(EngineConfig::new(grid_size, mode))
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn grid_size(&self) -> u32 {
        self.config.grid_size
    }

    #[must_use]
    pub fn game_mode(&self) -> GameMode {
        self.config.mode
    }

    /// Change the boundary policy.
    ///
    /// Only call this between games: a snake built under pass-through rules
    /// is not necessarily legal under walls rules.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        if mode != self.config.mode {
            log::debug!("Game mode changed: {} -> {}", self.config.mode, mode);
        }
        self.config.mode = mode;
    }

    // === Initial State ===

    /// Start a new game.
    ///
    /// Each call forks the session RNG, so consecutive games get different
    /// food sequences while the whole session stays reproducible from
    /// `config.seed`.
    pub fn create_initial_state(&mut self) -> GameState {
        let rng = self.session_rng.fork();
        self.initial_state_from(rng)
    }

    /// Start the game identified by `seed`, independent of the session.
    #[must_use]
    pub fn initial_state_with_seed(&self, seed: u64) -> GameState {
        self.initial_state_from(GameRng::new(seed))
    }

    fn initial_state_from(&self, mut rng: GameRng) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let snake: Vec<Position> = (0..INITIAL_SNAKE_LENGTH)
            .map(|i| Position::new(center - i, center))
            .collect();

        // Exclude the whole starting body, not just the head.
        let food = self.generate_food(snake.iter().copied(), &mut rng);

        GameState::new(snake, food, Direction::Right, self.config.grid_size)
            .with_rng(rng.state())
    }

    // === Food ===

    /// Pick a food cell outside `occupied`.
    ///
    /// Draws up to `max_food_attempts` uniform cells. If every draw collides,
    /// the configured [`FoodPlacement`] decides: `Sampling` keeps the last
    /// draw, `FreeCellFallback` picks uniformly among the free cells.
    pub fn generate_food<R>(
        &self,
        occupied: impl IntoIterator<Item = Position>,
        rng: &mut R,
    ) -> Position
    where
        R: RandomSource + ?Sized,
    {
        let occupied: FxHashSet<Position> = occupied.into_iter().collect();
        let n = self.config.grid_size as i32;

        let mut food = Position::new(rng.gen_coord(n), rng.gen_coord(n));
        let mut attempts = 1;
        while attempts < self.config.max_food_attempts && occupied.contains(&food) {
            food = Position::new(rng.gen_coord(n), rng.gen_coord(n));
            attempts += 1;
        }

        if !occupied.contains(&food) {
            log::trace!("Food placed at {} after {} draws", food, attempts);
            return food;
        }

        log::debug!(
            "Food placement hit the {} draw cap with {} cells occupied",
            attempts,
            occupied.len()
        );

        match self.config.food_placement {
            FoodPlacement::Sampling => food,
            FoodPlacement::FreeCellFallback => {
                let free: Vec<Position> = (0..n)
                    .flat_map(|y| (0..n).map(move |x| Position::new(x, y)))
                    .filter(|pos| !occupied.contains(pos))
                    .collect();

                if free.is_empty() {
                    log::debug!("Board is full, food stays on the snake at {}", food);
                    food
                } else {
                    free[rng.gen_index(free.len())]
                }
            }
        }
    }

    // === Movement and Collision ===

    /// Head position after one step, wrapped in pass-through mode.
    ///
    /// In walls mode the result may lie off the grid; collision detection
    /// catches it.
    #[must_use]
    pub fn next_head_position(&self, head: Position, direction: Direction) -> Position {
        let next = head.moved_in_direction(direction);
        match self.config.mode {
            GameMode::Walls => next,
            GameMode::PassThrough => next.wrapped(self.config.grid_size),
        }
    }

    /// Classify a collision of `head` against the current snake.
    ///
    /// `snake[0]` is the pre-move head and is skipped; every other segment,
    /// including the tail, counts.
    #[must_use]
    pub fn collision_kind(&self, head: Position, snake: &Vector<Position>) -> Option<CollisionKind> {
        if self.config.mode == GameMode::Walls && !head.is_within(self.config.grid_size) {
            return Some(CollisionKind::Wall);
        }

        if snake.iter().skip(1).any(|segment| *segment == head) {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    /// Check if `head` collides with a wall or the snake body.
    #[must_use]
    pub fn check_collision(&self, head: Position, snake: &Vector<Position>) -> bool {
        self.collision_kind(head, snake).is_some()
    }

    /// Check if the head landed on the food.
    #[must_use]
    pub fn check_food_collision(head: Position, food: Position) -> bool {
        head == food
    }

    /// Every change except a straight reversal is allowed, including no-ops.
    #[must_use]
    pub fn is_valid_direction_change(current: Direction, proposed: Direction) -> bool {
        !current.is_opposite(proposed)
    }

    // === Tick ===

    /// Advance one tick.
    ///
    /// Returns the next snapshot. See [`step`](Self::step) for a version that
    /// also reports what happened.
    #[must_use]
    pub fn move_snake(&self, state: &GameState, new_direction: Option<Direction>) -> GameState {
        self.step(state, new_direction).0
    }

    /// Advance one tick and report the outcome.
    ///
    /// Paused and finished snapshots come back unchanged with
    /// [`TickEvent::Idle`]. A colliding tick only sets `is_game_over`; snake,
    /// food, direction and score stay as they were.
    ///
    /// # Panics
    ///
    /// Panics if a running snapshot was created for a different grid size.
    pub fn step(&self, state: &GameState, new_direction: Option<Direction>) -> (GameState, TickEvent) {
        if state.is_game_over || state.is_paused {
            return (state.clone(), TickEvent::Idle);
        }

        assert_eq!(
            state.grid_size, self.config.grid_size,
            "snapshot was created for a different grid"
        );

        let direction = match new_direction {
            Some(proposed) if Self::is_valid_direction_change(state.direction, proposed) => proposed,
            _ => state.direction,
        };

        let new_head = self.next_head_position(state.head(), direction);

        if let Some(kind) = self.collision_kind(new_head, &state.snake) {
            log::debug!(
                "Game over at {} ({:?}) with score {} after {} ticks",
                new_head,
                kind,
                state.score,
                state.ticks
            );
            let next = GameState {
                is_game_over: true,
                ..state.clone()
            };
            return (next, TickEvent::Collided(kind));
        }

        let mut snake = state.snake.clone();
        snake.push_front(new_head);

        let mut next = GameState {
            direction,
            ticks: state.ticks.saturating_add(1),
            ..state.clone()
        };

        if Self::check_food_collision(new_head, state.food) {
            let reward = self.config.food_reward;
            let mut rng = GameRng::from_state(&state.rng);
            next.food = self.generate_food(snake.iter().copied(), &mut rng);
            next.rng = rng.state();
            next.score = state.score.saturating_add(reward);
            next.snake = snake;
            (next, TickEvent::Ate { at: new_head, reward })
        } else {
            snake.pop_back();
            next.snake = snake;
            (next, TickEvent::Moved)
        }
    }
}
