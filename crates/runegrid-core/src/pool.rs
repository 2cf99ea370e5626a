//! [`GridPool`], a free-list of grids for reuse without reallocation.
//!
//! Grids move into the pool on [`release`](GridPool::release) and back out on
//! [`acquire`](GridPool::acquire), so a released grid cannot be touched again
//! until it is handed out anew.

use crate::grid::Grid;

/// A free-list of owned grids.
#[derive(Debug)]
pub struct GridPool<T> {
    free: Vec<Grid<T>>,
    allocations: usize,
}

impl<T> Default for GridPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GridPool<T> {
    /// An empty pool.
    pub const fn new() -> Self {
        Self {
            free: Vec::new(),
            allocations: 0,
        }
    }

    /// Number of grids waiting in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// How many grids this pool has had to allocate fresh.
    #[inline]
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Hand a grid back to the pool.
    pub fn release(&mut self, grid: Grid<T>) {
        log::trace!(
            "grid pool: released {}x{} grid ({} pooled)",
            grid.width(),
            grid.height(),
            self.free.len() + 1
        );
        self.free.push(grid);
    }

    /// Drop every pooled grid.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl<T: Clone + Default> GridPool<T> {
    /// Get a `width` × `height` grid, reusing a pooled one when available.
    ///
    /// With `init`, every cell is set to it. Without, the contents are
    /// unspecified: a reused grid keeps stale values.
    pub fn acquire(&mut self, width: i32, height: i32, init: Option<T>) -> Grid<T> {
        match self.free.pop() {
            Some(mut grid) => {
                log::trace!(
                    "grid pool: reusing {}x{} grid as {width}x{height}",
                    grid.width(),
                    grid.height()
                );
                match init {
                    Some(v) => grid.resize(width, height, v),
                    None => grid.reshape(width, height, T::default()),
                }
                grid
            }
            None => {
                self.allocations += 1;
                log::trace!(
                    "grid pool: allocating {width}x{height} grid (#{})",
                    self.allocations
                );
                Grid::new(width, height, init.unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn acquire_on_empty_pool_allocates() {
        let mut pool: GridPool<i32> = GridPool::new();
        let g = pool.acquire(4, 3, Some(7));
        assert_eq!(g.size(), Point::new(4, 3));
        assert!(g.every(|_, &v| v == 7));
        assert_eq!(pool.allocations(), 1);
    }

    #[test]
    fn release_then_acquire_reuses_storage() {
        let mut pool: GridPool<i32> = GridPool::new();
        let g = pool.acquire(10, 10, Some(0));
        let ptr = g.as_slice().as_ptr();
        pool.release(g);
        assert_eq!(pool.len(), 1);

        let g = pool.acquire(10, 10, Some(5));
        assert_eq!(pool.allocations(), 1);
        assert_eq!(g.as_slice().as_ptr(), ptr);
        assert!(g.every(|_, &v| v == 5));
        assert!(pool.is_empty());
    }

    #[test]
    fn reused_grid_is_resized() {
        let mut pool: GridPool<u8> = GridPool::new();
        let g = pool.acquire(8, 8, Some(1));
        pool.release(g);
        let g = pool.acquire(3, 5, Some(2));
        assert_eq!(g.size(), Point::new(3, 5));
        assert_eq!(g.as_slice().len(), 15);
        assert_eq!(pool.allocations(), 1);
    }

    #[test]
    fn acquire_without_init_keeps_shape_only() {
        let mut pool: GridPool<i32> = GridPool::new();
        let mut g = pool.acquire(2, 2, None);
        assert!(g.every(|_, &v| v == 0));
        g.fill(9);
        pool.release(g);
        // Stale contents are allowed; only the shape is guaranteed.
        let mut g = pool.acquire(2, 2, None);
        assert_eq!(g.size(), Point::new(2, 2));
        g.fill(0);
        assert!(g.every(|_, &v| v == 0));
    }

    #[test]
    fn pool_grows_when_all_checked_out() {
        let mut pool: GridPool<i32> = GridPool::new();
        let a = pool.acquire(2, 2, Some(0));
        let b = pool.acquire(2, 2, Some(0));
        assert_eq!(pool.allocations(), 2);
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.len(), 2);
        pool.clear();
        assert!(pool.is_empty());
    }
}
