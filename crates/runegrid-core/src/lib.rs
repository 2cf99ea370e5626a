//! **runegrid-core**: spatial primitives for grid-based games.
//!
//! This crate provides the foundations shared by the rest of the *runegrid*
//! workspace: points and bounds, the eight grid directions, distance
//! metrics, fixed-point line stepping, circle rasterization, and a dense
//! [`Grid`] type with a pooling allocator.

pub mod circle;
pub mod dir;
pub mod distance;
pub mod error;
pub mod geom;
pub mod grid;
pub mod line;
pub mod numgrid;
pub mod pool;

pub use circle::{circle_points, for_circle, for_radius};
pub use dir::{CLOCK_DIRS, DIRS, Dir};
pub use distance::{
    Blended, Chebyshev, DistanceMetric, Euclidean, chebyshev, distance_between, euclidean,
    manhattan,
};
pub use error::GridError;
pub use geom::{Bounds, BoundsIter, Point};
pub use grid::Grid;
pub use line::{LineStepper, for_line_between, for_ray, line_between};
pub use numgrid::NumGrid;
pub use pool::GridPool;
