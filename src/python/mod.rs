//! Python bindings for the snake engine.
//!
//! # Quick Start
//!
//! ```python
//! import snake_engine as snake
//!
//! game = snake.SnakeGame(grid_size=20, mode="pass-through", seed=7)
//! while not game.is_game_over:
//!     event = game.tick(snake.Direction("UP"))
//!
//! board = game.board()  # numpy uint8 [20, 20]
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// snake_engine: deterministic grid snake.
#[pymodule]
fn snake_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDirection>()?;
    m.add_class::<PyPosition>()?;
    m.add_class::<PySnakeGame>()?;

    Ok(())
}
