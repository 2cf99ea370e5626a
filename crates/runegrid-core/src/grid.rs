//! The [`Grid`] type: a dense, owned 2D grid of values.
//!
//! Cells are stored row-major; every iteration helper visits them in that
//! order. Reads outside the grid return `None` and writes outside it are
//! rejected without touching storage.

use rand::{Rng, RngExt};

use crate::circle::for_circle;
use crate::error::GridError;
use crate::geom::{Bounds, Point};
use crate::numgrid::NumGrid;

/// A `width` × `height` grid of `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Bounds covering the whole grid, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::sized(self.width, self.height)
    }

    /// Whether `p` is a valid coordinate.
    #[inline]
    pub fn has_xy(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.has_xy(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// Backing storage, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Borrow the value at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutably borrow the value at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Set the value at `p`. Returns `false`, leaving the grid untouched, if
    /// `p` is out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// Call `f` on every cell, row-major.
    pub fn for_each(&self, mut f: impl FnMut(Point, &T)) {
        for (p, v) in self.iter() {
            f(p, v);
        }
    }

    /// Replace every cell with `f(p, &old)`.
    pub fn update(&mut self, mut f: impl FnMut(Point, &T) -> T) {
        let b = self.bounds();
        for (p, v) in b.iter().zip(self.cells.iter_mut()) {
            *v = f(p, v);
        }
    }

    /// Apply `f` to every cell of `rect` that lies inside the grid. Returns
    /// the number of cells visited.
    pub fn update_rect(&mut self, rect: Bounds, mut f: impl FnMut(Point, &T) -> T) -> usize {
        let area = rect.intersect(self.bounds());
        for p in area.iter() {
            let i = (p.y * self.width + p.x) as usize;
            self.cells[i] = f(p, &self.cells[i]);
        }
        area.len()
    }

    /// Apply `f` to every in-bounds cell of the disc of `radius` around
    /// `center` (see [`for_circle`]). Returns the number of cells visited.
    pub fn update_circle(
        &mut self,
        center: Point,
        radius: i32,
        mut f: impl FnMut(Point, &T) -> T,
    ) -> usize {
        let mut n = 0;
        for_circle(center, radius, |p| {
            if let Some(i) = self.index(p) {
                self.cells[i] = f(p, &self.cells[i]);
                n += 1;
            }
        });
        n
    }

    /// Count the cells satisfying `pred`.
    pub fn count(&self, mut pred: impl FnMut(Point, &T) -> bool) -> usize {
        self.iter().filter(|&(p, v)| pred(p, v)).count()
    }

    /// Whether any cell satisfies `pred`.
    pub fn some(&self, mut pred: impl FnMut(Point, &T) -> bool) -> bool {
        self.iter().any(|(p, v)| pred(p, v))
    }

    /// Whether every cell satisfies `pred`.
    pub fn every(&self, mut pred: impl FnMut(Point, &T) -> bool) -> bool {
        self.iter().all(|(p, v)| pred(p, v))
    }

    /// Smallest bounds containing every cell that satisfies `pred`, or the
    /// empty default bounds if none does.
    pub fn calc_bounds(&self, mut pred: impl FnMut(Point, &T) -> bool) -> Bounds {
        let mut min = Point::new(i32::MAX, i32::MAX);
        let mut max = Point::new(i32::MIN, i32::MIN);
        let mut found = false;
        for (p, v) in self.iter() {
            if pred(p, v) {
                found = true;
                min = Point::new(min.x.min(p.x), min.y.min(p.y));
                max = Point::new(max.x.max(p.x), max.y.max(p.y));
            }
        }
        if !found {
            return Bounds::default();
        }
        Bounds::from_corners(min, max)
    }

    /// Every matching cell on the smallest Chebyshev ring around `p` that
    /// contains a match, in row-major order.
    ///
    /// Rings are searched out to `max(width, height)`; the result is empty
    /// if nothing matches within that radius.
    pub fn closest_matching_locs(
        &self,
        p: Point,
        mut pred: impl FnMut(Point, &T) -> bool,
    ) -> Vec<Point> {
        let mut locs = Vec::new();
        let limit = self.width.max(self.height);
        for k in 0..=limit {
            for dy in -k..=k {
                let step = if dy == -k || dy == k { 1 } else { 2 * k };
                let mut dx = -k;
                while dx <= k {
                    let q = p.shift(dx, dy);
                    if let Some(v) = self.get(q) {
                        if pred(q, v) {
                            locs.push(q);
                        }
                    }
                    dx += step;
                }
            }
            if !locs.is_empty() {
                break;
            }
        }
        locs
    }

    /// A uniformly chosen cell satisfying `pred`, or `None` if none does.
    pub fn random_matching_loc(
        &self,
        rng: &mut impl Rng,
        mut pred: impl FnMut(Point, &T) -> bool,
    ) -> Option<Point> {
        let matches: Vec<Point> = self
            .iter()
            .filter(|&(p, v)| pred(p, v))
            .map(|(p, _)| p)
            .collect();
        if matches.is_empty() {
            return None;
        }
        Some(matches[rng.random_range(0..matches.len())])
    }

    /// Render the grid one character per cell, rows separated by newlines.
    pub fn dump(&self, mut fmt: impl FnMut(&T) -> char) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height.max(0) as usize);
        for (i, row) in self.cells.chunks(self.width.max(1) as usize).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(&mut fmt));
        }
        out
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `init`. Negative sizes are
    /// clamped to zero.
    pub fn new(width: i32, height: i32, init: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![init; (width * height) as usize],
        }
    }

    /// Change the shape in place and set every cell to `fill`. The backing
    /// buffer is reused when its capacity allows.
    pub fn resize(&mut self, width: i32, height: i32, fill: T) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.cells.clear();
        self.cells.resize((self.width * self.height) as usize, fill);
    }

    /// Change the shape in place without reinitialising: surviving cells keep
    /// whatever they held, new ones get `pad`.
    pub(crate) fn reshape(&mut self, width: i32, height: i32, pad: T) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.cells.resize((self.width * self.height) as usize, pad);
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Set every cell to `f(p)`.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> T) {
        self.update(|p, _| f(p));
    }

    /// Set every in-bounds cell of the disc of `radius` around `center` to
    /// `value`. Returns the number of cells written.
    pub fn fill_circle(&mut self, center: Point, radius: i32, value: T) -> usize {
        self.update_circle(center, radius, |_, _| value.clone())
    }

    /// Copy every cell of `other`, which must have the same size.
    pub fn try_copy_from(&mut self, other: &Grid<T>) -> Result<(), GridError> {
        if self.size() != other.size() {
            return Err(GridError::SizeMismatch {
                expected: self.size(),
                found: other.size(),
            });
        }
        self.cells.clone_from_slice(&other.cells);
        Ok(())
    }

    /// Copy every cell of `other`.
    ///
    /// # Panics
    ///
    /// If the two grids differ in size.
    pub fn copy_from(&mut self, other: &Grid<T>) {
        if let Err(e) = self.try_copy_from(other) {
            panic!("{e}");
        }
    }

    /// Fill the 4-connected region of cells matching `matches` that contains
    /// `start` with `value`. Returns the number of cells changed, 0 if
    /// `start` is out of bounds or does not match.
    ///
    /// The walk uses an explicit stack and a pooled visited mask, so it is
    /// safe when `value` itself satisfies `matches`.
    pub fn flood_fill(
        &mut self,
        start: Point,
        mut matches: impl FnMut(Point, &T) -> bool,
        value: T,
    ) -> usize {
        match self.get(start) {
            Some(v) if matches(start, v) => {}
            _ => return 0,
        }
        let mut done = NumGrid::alloc(self.width, self.height, 0);
        let mut todo = vec![start];
        done.set(start, 1);
        let mut count = 0;
        while let Some(p) = todo.pop() {
            self.set(p, value.clone());
            count += 1;
            for n in p.neighbors_4() {
                if done.at(n) != Some(0) {
                    continue;
                }
                if let Some(v) = self.get(n) {
                    if matches(n, v) {
                        done.set(n, 1);
                        todo.push(n);
                    }
                }
            }
        }
        NumGrid::free(done);
        count
    }
}

impl<T: Copy> Grid<T> {
    /// Copy of the value at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.get(p).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn new_and_size() {
        let g = Grid::new(10, 5, 0u8);
        assert_eq!(g.size(), Point::new(10, 5));
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 5);
        assert_eq!(g.as_slice().len(), 50);
        assert_eq!(Grid::new(-2, 3, 0u8).as_slice().len(), 0);
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid::new(4, 4, 0);
        let p = Point::new(2, 3);
        assert!(g.set(p, 42));
        assert_eq!(g.at(p), Some(42));
        assert_eq!(g.get(Point::new(0, 0)), Some(&0));
        *g.get_mut(Point::new(1, 1)).unwrap() = 7;
        assert_eq!(g.at(Point::new(1, 1)), Some(7));
    }

    #[test]
    fn out_of_bounds_is_absent_and_unchanged() {
        let mut g = Grid::new(3, 2, 5);
        let before = g.clone();
        for p in [
            Point::new(-1, 0),
            Point::new(0, -1),
            Point::new(3, 0),
            Point::new(0, 2),
            Point::new(100, 100),
        ] {
            assert_eq!(g.get(p), None);
            assert!(!g.set(p, 9));
            assert!(g.get_mut(p).is_none());
        }
        assert_eq!(g, before);
    }

    #[test]
    fn for_each_is_row_major() {
        let mut g = Grid::new(3, 2, 0);
        g.fill_fn(|p| p.y * 10 + p.x);
        let mut seen = Vec::new();
        g.for_each(|p, &v| seen.push((p, v)));
        assert_eq!(seen[0], (Point::new(0, 0), 0));
        assert_eq!(seen[2], (Point::new(2, 0), 2));
        assert_eq!(seen[3], (Point::new(0, 1), 10));
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn fill_and_count() {
        let mut g = Grid::new(5, 5, 0);
        g.fill(1);
        assert_eq!(g.count(|_, &v| v == 1), 25);
        g.set(Point::new(0, 0), 2);
        assert_eq!(g.count(|_, &v| v == 1), 24);
        assert!(g.some(|_, &v| v == 2));
        assert!(!g.every(|_, &v| v == 1));
    }

    #[test]
    fn update_rect_clips_to_grid() {
        let mut g = Grid::new(4, 4, 0);
        let n = g.update_rect(Bounds::new(2, 2, 5, 5), |_, &v| v + 1);
        assert_eq!(n, 4);
        assert_eq!(g.count(|_, &v| v == 1), 4);
        assert_eq!(g.at(Point::new(3, 3)), Some(1));
        assert_eq!(g.at(Point::new(1, 1)), Some(0));
    }

    #[test]
    fn fill_circle_clips_to_grid() {
        let mut g = Grid::new(5, 5, '.');
        let n = g.fill_circle(Point::new(0, 0), 1, '#');
        assert_eq!(n, 3);
        assert_eq!(g.dump(|&c| c).lines().next(), Some("##..."));
        assert_eq!(g.fill_circle(Point::new(3, 3), 0, '#'), 0);
        assert_eq!(g.at(Point::new(3, 3)), Some('.'));
    }

    #[test]
    fn calc_bounds_of_matches() {
        let mut g = Grid::new(8, 8, false);
        g.set(Point::new(2, 5), true);
        g.set(Point::new(6, 1), true);
        assert_eq!(g.calc_bounds(|_, &v| v), Bounds::new(2, 1, 5, 5));
    }

    #[test]
    fn calc_bounds_no_match_is_empty() {
        let g = Grid::new(8, 8, false);
        let b = g.calc_bounds(|_, &v| v);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn flood_fill_two_by_two() {
        let mut g = Grid::new(5, 5, 0);
        for p in [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(0, 1),
            Point::new(1, 1),
        ] {
            g.set(p, 1);
        }
        // Diagonal neighbour must not be reached by a 4-way fill.
        g.set(Point::new(2, 2), 1);
        let n = g.flood_fill(Point::new(0, 0), |_, &v| v == 1, 7);
        assert_eq!(n, 4);
        assert_eq!(g.count(|_, &v| v == 7), 4);
        assert_eq!(g.at(Point::new(2, 2)), Some(1));
    }

    #[test]
    fn flood_fill_with_matching_fill_value_terminates() {
        let mut g = Grid::new(6, 3, 1);
        let n = g.flood_fill(Point::new(2, 1), |_, &v| v > 0, 2);
        assert_eq!(n, 18);
    }

    #[test]
    fn flood_fill_non_matching_start() {
        let mut g = Grid::new(3, 3, 0);
        assert_eq!(g.flood_fill(Point::new(1, 1), |_, &v| v == 1, 5), 0);
        assert_eq!(g.flood_fill(Point::new(-1, 1), |_, &v| v == 0, 5), 0);
        assert!(g.every(|_, &v| v == 0));
    }

    #[test]
    fn flood_fill_large_region_is_not_recursive() {
        let mut g = Grid::new(400, 400, 0u8);
        assert_eq!(g.flood_fill(Point::new(0, 0), |_, &v| v == 0, 1), 160_000);
    }

    #[test]
    fn closest_matching_locs_ring() {
        let mut g = Grid::new(10, 10, 0);
        g.set(Point::new(7, 5), 1);
        g.set(Point::new(3, 3), 1);
        g.set(Point::new(5, 8), 1);
        let locs = g.closest_matching_locs(Point::new(5, 5), |_, &v| v == 1);
        assert_eq!(locs, vec![Point::new(3, 3), Point::new(7, 5)]);
    }

    #[test]
    fn closest_matching_locs_self_and_none() {
        let mut g = Grid::new(4, 4, 0);
        g.set(Point::new(1, 1), 3);
        assert_eq!(
            g.closest_matching_locs(Point::new(1, 1), |_, &v| v == 3),
            vec![Point::new(1, 1)]
        );
        let none = g.closest_matching_locs(Point::new(1, 1), |_, &v| v == 9);
        assert!(none.is_empty());
    }

    #[test]
    fn closest_matching_locs_checks_each_cell_once_by_ring() {
        let g = Grid::new(9, 6, 0);
        let origin = Point::new(2, 4);
        let mut seen = Vec::new();
        let locs = g.closest_matching_locs(origin, |q, _| {
            seen.push(q);
            false
        });
        assert!(locs.is_empty());
        assert_eq!(seen.len(), 54);
        let unique: HashSet<_> = seen.iter().copied().collect();
        assert_eq!(unique.len(), 54);
        let rings: Vec<i32> = seen
            .iter()
            .map(|q| (q.x - origin.x).abs().max((q.y - origin.y).abs()))
            .collect();
        assert!(rings.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn random_matching_loc_only_matches() {
        let mut g = Grid::new(6, 6, 0);
        g.set(Point::new(1, 4), 1);
        g.set(Point::new(5, 0), 1);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let p = g.random_matching_loc(&mut rng, |_, &v| v == 1).unwrap();
            assert_eq!(g.at(p), Some(1));
        }
        assert_eq!(g.random_matching_loc(&mut rng, |_, &v| v == 2), None);
    }

    #[test]
    fn resize_reuses_buffer() {
        let mut g = Grid::new(10, 10, 0);
        let ptr = g.as_slice().as_ptr();
        g.resize(5, 4, 3);
        assert_eq!(g.size(), Point::new(5, 4));
        assert!(g.every(|_, &v| v == 3));
        assert_eq!(g.as_slice().as_ptr(), ptr);
    }

    #[test]
    fn copy_from_same_size() {
        let mut a = Grid::new(3, 3, 0);
        let mut b = Grid::new(3, 3, 0);
        b.set(Point::new(2, 2), 9);
        a.copy_from(&b);
        assert_eq!(a.at(Point::new(2, 2)), Some(9));
    }

    #[test]
    fn try_copy_from_size_mismatch() {
        let mut a = Grid::new(3, 3, 0);
        let b = Grid::new(4, 3, 0);
        assert_eq!(
            a.try_copy_from(&b),
            Err(GridError::SizeMismatch {
                expected: Point::new(3, 3),
                found: Point::new(4, 3),
            })
        );
    }

    #[test]
    #[should_panic(expected = "grid size mismatch")]
    fn copy_from_size_mismatch_panics() {
        let mut a = Grid::new(3, 3, 0);
        a.copy_from(&Grid::new(2, 2, 0));
    }

    #[test]
    fn dump_rows() {
        let mut g = Grid::new(3, 2, false);
        g.set(Point::new(1, 0), true);
        assert_eq!(g.dump(|&v| if v { '#' } else { '.' }), ".#.\n...");
    }
}
