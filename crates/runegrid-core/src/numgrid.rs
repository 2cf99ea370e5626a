//! [`NumGrid`], the integer specialization of [`Grid`], with a process-wide
//! pool.
//!
//! Scratch grids (visited masks, temporary maps) come from
//! [`NumGrid::alloc`] and go back through [`NumGrid::free`]. The pool lives
//! behind a mutex so acquire and release are serialized across threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::GridError;
use crate::geom::{Bounds, Point};
use crate::grid::Grid;
use crate::pool::GridPool;

/// A grid of `i32` cells.
pub type NumGrid = Grid<i32>;

static NUM_POOL: Mutex<GridPool<i32>> = Mutex::new(GridPool::new());

fn num_pool() -> MutexGuard<'static, GridPool<i32>> {
    // Poisoning is ignored: push and pop never leave the free-list torn.
    NUM_POOL.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Grid<i32> {
    /// A `width` × `height` grid filled with `init`, taken from the shared
    /// pool when one is available.
    pub fn alloc(width: i32, height: i32, init: i32) -> NumGrid {
        num_pool().acquire(width, height, Some(init))
    }

    /// Return a grid obtained from [`alloc`](Self::alloc) to the shared pool.
    pub fn free(grid: NumGrid) {
        num_pool().release(grid);
    }

    /// Number of grids currently waiting in the shared pool.
    pub fn pooled() -> usize {
        num_pool().len()
    }

    /// Add `other * multiplier` to every cell.
    pub fn try_add(&mut self, other: &NumGrid, multiplier: i32) -> Result<(), GridError> {
        if self.size() != other.size() {
            return Err(GridError::SizeMismatch {
                expected: self.size(),
                found: other.size(),
            });
        }
        let src = other.as_slice();
        let mut i = 0;
        self.update(|_, &v| {
            let out = v + src[i] * multiplier;
            i += 1;
            out
        });
        Ok(())
    }

    /// Add `other * multiplier` to every cell.
    ///
    /// # Panics
    ///
    /// If the two grids differ in size.
    pub fn add(&mut self, other: &NumGrid, multiplier: i32) {
        if let Err(e) = self.try_add(other, multiplier) {
            panic!("{e}");
        }
    }

    /// Replace every value in `min..=max` with `value`. Returns the number
    /// of cells replaced.
    pub fn find_replace(&mut self, min: i32, max: i32, value: i32) -> usize {
        let mut n = 0;
        self.update(|_, &v| {
            if (min..=max).contains(&v) {
                n += 1;
                value
            } else {
                v
            }
        });
        n
    }

    /// 4-way flood fill from `start` over cells whose value is in
    /// `min..=max`. Returns the number of cells changed.
    pub fn flood_fill_range(&mut self, start: Point, min: i32, max: i32, value: i32) -> usize {
        self.flood_fill(start, |_, v| (min..=max).contains(v), value)
    }

    /// Turn zero cells into 1 and every other cell into 0.
    pub fn invert(&mut self) {
        self.update(|_, &v| i32::from(v == 0));
    }

    /// Largest cell value, or `None` for an empty grid.
    pub fn max_value(&self) -> Option<i32> {
        self.as_slice().iter().copied().max()
    }

    /// Smallest cell value, or `None` for an empty grid.
    pub fn min_value(&self) -> Option<i32> {
        self.as_slice().iter().copied().min()
    }

    /// Smallest strictly positive value, or `None` if there is none.
    pub fn least_positive_value(&self) -> Option<i32> {
        self.as_slice().iter().copied().filter(|&v| v > 0).min()
    }

    /// Bounds of every cell equal to `value`.
    pub fn value_bounds(&self, value: i32) -> Bounds {
        self.calc_bounds(|_, &v| v == value)
    }
}
