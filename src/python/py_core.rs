//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::{Direction, Position};

/// Python wrapper for Direction.
#[pyclass(name = "Direction")]
#[derive(Clone, Debug)]
pub struct PyDirection(pub Direction);

#[pymethods]
impl PyDirection {
    /// Create a direction from its name: "UP", "DOWN", "LEFT" or "RIGHT".
    #[new]
    fn new(name: &str) -> PyResult<Self> {
        let direction = match name.to_ascii_uppercase().as_str() {
            "UP" => Direction::Up,
            "DOWN" => Direction::Down,
            "LEFT" => Direction::Left,
            "RIGHT" => Direction::Right,
            other => {
                return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "Unknown direction: {}",
                    other
                )))
            }
        };
        Ok(Self(direction))
    }

    #[getter]
    fn name(&self) -> String {
        self.0.to_string()
    }

    /// The reverse heading.
    fn opposite(&self) -> Self {
        Self(self.0.opposite())
    }

    fn __repr__(&self) -> String {
        format!("Direction({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0 as u64
    }
}

/// Python wrapper for Position.
#[pyclass(name = "Position")]
#[derive(Clone, Debug)]
pub struct PyPosition(pub Position);

#[pymethods]
impl PyPosition {
    #[new]
    fn new(x: i32, y: i32) -> Self {
        Self(Position::new(x, y))
    }

    #[getter]
    fn x(&self) -> i32 {
        self.0.x
    }

    #[getter]
    fn y(&self) -> i32 {
        self.0.y
    }

    fn __repr__(&self) -> String {
        format!("Position{}", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        ((self.0.x as u32 as u64) << 32) | self.0.y as u32 as u64
    }
}
