//! Steering policies for unattended play.
//!
//! - `Straight`: never steers; the snake runs until it hits something
//! - `Autopilot`: greedy, one-step lookahead toward the food

use crate::core::{Direction, GameMode, GameState};
use crate::rules::SnakeEngine;

/// Chooses the direction input for the next tick.
pub trait SteeringPolicy {
    /// Direction to pass to the tick, or `None` to keep the current heading.
    fn choose(&mut self, engine: &SnakeEngine, state: &GameState) -> Option<Direction>;
}

/// Never steers.
#[derive(Clone, Debug, Default)]
pub struct Straight;

impl SteeringPolicy for Straight {
    fn choose(&mut self, _engine: &SnakeEngine, _state: &GameState) -> Option<Direction> {
        None
    }
}

/// Greedy food-seeking policy.
///
/// Looks at the three headings reachable this tick (straight first), drops
/// the ones that collide, and takes the one whose next head is closest to
/// the food. Distance wraps around the edges in pass-through mode. Ties go
/// to the earlier heading, so the snake prefers not to turn.
///
/// Returns `None` when every heading collides.
#[derive(Clone, Debug, Default)]
pub struct Autopilot;

impl SteeringPolicy for Autopilot {
    fn choose(&mut self, engine: &SnakeEngine, state: &GameState) -> Option<Direction> {
        let head = state.head();
        let mut best: Option<(Direction, u32)> = None;

        for direction in state.direction.turns() {
            let next = engine.next_head_position(head, direction);
            if engine.check_collision(next, &state.snake) {
                continue;
            }

            let distance = match engine.game_mode() {
                GameMode::Walls => next.manhattan(state.food),
                GameMode::PassThrough => next.wrapped_manhattan(state.food, engine.grid_size()),
            };

            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((direction, distance));
            }
        }

        best.map(|(direction, _)| direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    fn engine(mode: GameMode) -> SnakeEngine {
        SnakeEngine::with_grid(10, mode).unwrap()
    }

    fn state(snake: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        GameState::new(
            snake.iter().map(|&p| Position::from(p)),
            Position::from(food),
            direction,
            10,
        )
    }

    #[test]
    fn test_straight_never_steers() {
        let engine = engine(GameMode::Walls);
        let state = state(&[(5, 5)], Direction::Right, (0, 0));

        assert_eq!(Straight.choose(&engine, &state), None);
    }

    #[test]
    fn test_autopilot_turns_toward_food() {
        let engine = engine(GameMode::Walls);
        let state = state(&[(5, 5), (4, 5)], Direction::Right, (5, 1));

        assert_eq!(Autopilot.choose(&engine, &state), Some(Direction::Up));
    }

    #[test]
    fn test_autopilot_prefers_straight_on_tie() {
        let engine = engine(GameMode::Walls);
        // Food straight ahead and diagonally: straight and up are both 1 closer
        let state = state(&[(5, 5), (4, 5)], Direction::Right, (7, 4));

        assert_eq!(Autopilot.choose(&engine, &state), Some(Direction::Right));
    }

    #[test]
    fn test_autopilot_avoids_wall() {
        let engine = engine(GameMode::Walls);
        // Food beyond the right wall in walls mode is unreachable straight on
        let state = state(&[(9, 5), (8, 5)], Direction::Right, (9, 9));

        assert_eq!(Autopilot.choose(&engine, &state), Some(Direction::Down));
    }

    #[test]
    fn test_autopilot_avoids_body() {
        let engine = engine(GameMode::Walls);
        // Up is blocked by the body, food is up-right
        let state = state(
            &[(5, 5), (4, 5), (4, 4), (5, 4), (6, 4)],
            Direction::Right,
            (5, 0),
        );

        let choice = Autopilot.choose(&engine, &state);
        assert_ne!(choice, Some(Direction::Up));
        assert!(choice.is_some());
    }

    #[test]
    fn test_autopilot_wraps_in_pass_through() {
        let engine = engine(GameMode::PassThrough);
        // Food is 2 cells away across the left edge, 8 cells away directly
        let state = state(&[(1, 5), (1, 6)], Direction::Up, (9, 5));

        assert_eq!(Autopilot.choose(&engine, &state), Some(Direction::Left));
    }

    #[test]
    fn test_autopilot_trapped() {
        let engine = engine(GameMode::Walls);
        // Corner, heading up, body blocks the only free side
        let state = state(&[(0, 0), (0, 1), (1, 1), (1, 0)], Direction::Up, (5, 5));

        assert_eq!(Autopilot.choose(&engine, &state), None);
    }
}
