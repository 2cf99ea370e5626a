use std::fmt;

use crate::geom::Point;

/// Errors reported by the fallible grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Two grids that must have the same shape do not.
    SizeMismatch { expected: Point, found: Point },
    /// A coordinate lies outside the grid.
    OutOfBounds(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, found } => write!(
                f,
                "grid size mismatch: expected {}x{}, found {}x{}",
                expected.x, expected.y, found.x, found.y
            ),
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is outside the grid"),
        }
    }
}

impl std::error::Error for GridError {}
