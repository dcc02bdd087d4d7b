//! Game bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::prelude::*;

use crate::core::{ConfigError, EngineConfig, GameMode, GameState};
use crate::rules::{CollisionKind, SnakeEngine, TickEvent};

use super::py_core::{PyDirection, PyPosition};

/// Board cell codes returned by `SnakeGame.board()`.
const CELL_EMPTY: u8 = 0;
const CELL_BODY: u8 = 1;
const CELL_HEAD: u8 = 2;
const CELL_FOOD: u8 = 3;

fn config_err(e: ConfigError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

/// Python wrapper holding an engine and the current snapshot.
#[pyclass(name = "SnakeGame")]
pub struct PySnakeGame {
    engine: SnakeEngine,
    state: GameState,
}

#[pymethods]
impl PySnakeGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - grid_size: Side length of the square grid (at least 4)
    /// - mode: "walls" or "pass-through"
    /// - seed: Session seed; every reset forks a new game from it
    #[new]
    #[pyo3(signature = (grid_size = 20, mode = "walls", seed = 42))]
    fn new(grid_size: u32, mode: &str, seed: u64) -> PyResult<Self> {
        let mode: GameMode = mode.parse().map_err(config_err)?;
        let config = EngineConfig::new(grid_size, mode).with_seed(seed);
        let mut engine = SnakeEngine::new(config).map_err(config_err)?;
        let state = engine.create_initial_state();
        Ok(Self { engine, state })
    }

    /// Advance one tick.
    ///
    /// Returns what happened: "idle", "moved", "ate", "wall" or "self".
    #[pyo3(signature = (direction = None))]
    fn tick(&mut self, direction: Option<PyDirection>) -> &'static str {
        let (next, event) = self.engine.step(&self.state, direction.map(|d| d.0));
        self.state = next;
        match event {
            TickEvent::Idle => "idle",
            TickEvent::Moved => "moved",
            TickEvent::Ate { .. } => "ate",
            TickEvent::Collided(CollisionKind::Wall) => "wall",
            TickEvent::Collided(CollisionKind::SelfCollision) => "self",
        }
    }

    /// Start a new game.
    fn reset(&mut self) {
        self.state = self.engine.create_initial_state();
    }

    /// Pause or resume. No effect once the game is over.
    fn toggle_pause(&mut self) {
        self.state = self.state.toggle_pause();
    }

    /// Board as a `grid_size x grid_size` uint8 array indexed `[y, x]`.
    ///
    /// 0 = empty, 1 = body, 2 = head, 3 = food.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let n = self.engine.grid_size();
        let mut cells = vec![CELL_EMPTY; (n * n) as usize];
        let index = |x: i32, y: i32| (y as u32 * n + x as u32) as usize;

        if self.state.food.is_within(n) {
            cells[index(self.state.food.x, self.state.food.y)] = CELL_FOOD;
        }
        for segment in self.state.body_segments() {
            if segment.is_within(n) {
                cells[index(segment.x, segment.y)] = CELL_BODY;
            }
        }
        let head = self.state.head();
        if head.is_within(n) {
            cells[index(head.x, head.y)] = CELL_HEAD;
        }

        PyArray1::from_vec_bound(py, cells)
            .reshape([n as usize, n as usize])
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))
    }

    #[getter]
    fn snake(&self) -> Vec<PyPosition> {
        self.state.snake.iter().copied().map(PyPosition).collect()
    }

    #[getter]
    fn food(&self) -> PyPosition {
        PyPosition(self.state.food)
    }

    #[getter]
    fn direction(&self) -> PyDirection {
        PyDirection(self.state.direction)
    }

    #[getter]
    fn score(&self) -> u32 {
        self.state.score
    }

    #[getter]
    fn is_game_over(&self) -> bool {
        self.state.is_game_over
    }

    #[getter]
    fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    #[getter]
    fn grid_size(&self) -> u32 {
        self.engine.grid_size()
    }

    /// Boundary mode; changing it starts a new game.
    #[getter]
    fn mode(&self) -> &'static str {
        self.engine.game_mode().as_str()
    }

    #[setter]
    fn set_mode(&mut self, mode: &str) -> PyResult<()> {
        let mode: GameMode = mode.parse().map_err(config_err)?;
        self.engine.set_game_mode(mode);
        self.state = self.engine.create_initial_state();
        Ok(())
    }

    fn __repr__(&self) -> String {
        format!(
            "SnakeGame(mode={}, length={}, score={}, status={:?})",
            self.engine.game_mode(),
            self.state.len(),
            self.state.score,
            self.state.status()
        )
    }
}
