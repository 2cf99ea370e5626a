//! Geometry primitives: [`Point`] and [`Bounds`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use crate::dir::Dir;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbour one step away in direction `dir`.
    #[inline]
    pub fn step(self, dir: Dir) -> Self {
        self + dir.delta()
    }

    /// Whether the point is inside `b`.
    #[inline]
    pub fn in_bounds(self, b: &Bounds) -> bool {
        b.contains(self)
    }

    /// The four orthogonal neighbours, in [`Dir::CARDINAL`] order.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        Dir::CARDINAL.map(|d| self.step(d))
    }

    /// All eight neighbours, in [`Dir::ALL`] order.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        Dir::ALL.map(|d| self.step(d))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle: origin `(x, y)` plus `width` × `height`.
///
/// The covered cells are `x..x + width` by `y..y + height`, so
/// [`right`](Bounds::right) and [`bottom`](Bounds::bottom) are exclusive.
/// All empty bounds are considered equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PartialEq for Bounds {
    fn eq(&self, other: &Self) -> bool {
        (self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height)
            || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Bounds {}

impl Hash for Bounds {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            // All empty bounds hash the same.
            [0i32; 4].hash(state);
        } else {
            [self.x, self.y, self.width, self.height].hash(state);
        }
    }
}

impl Bounds {
    /// Create bounds from an origin and a size. Negative sizes are clamped
    /// to zero.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Bounds covering `0..width` × `0..height`.
    #[inline]
    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Bounds spanning two corners, both inclusive, in either order.
    #[inline]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));
        Self::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1)
    }

    #[inline]
    pub const fn left(self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn top(self) -> i32 {
        self.y
    }

    /// One past the rightmost column.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size as a `Point` (width, height).
    #[inline]
    pub const fn size(self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Central cell, rounding towards the origin.
    #[inline]
    pub const fn center(self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width as usize) * (self.height as usize)
    }

    /// Whether the bounds cover no cell.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether `p` is inside the bounds.
    #[inline]
    pub const fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Whether `self` lies entirely inside `other`. Empty bounds are inside
    /// everything.
    #[inline]
    pub fn within(self, other: Bounds) -> bool {
        self.is_empty() || self.intersect(other) == self
    }

    /// Return the bounds translated by `p`.
    #[inline]
    pub const fn translate(self, p: Point) -> Self {
        Self::new(self.x + p.x, self.y + p.y, self.width, self.height)
    }

    /// Return the bounds grown by `n` cells on every side (shrunk when `n`
    /// is negative). Collapses to the empty default when nothing is left.
    #[inline]
    pub fn pad(self, n: i32) -> Self {
        let b = Self::new(
            self.x - n,
            self.y - n,
            self.width + 2 * n,
            self.height + 2 * n,
        );
        if b.is_empty() { Self::default() } else { b }
    }

    /// Intersection of two bounds (may be empty).
    #[inline]
    pub fn intersect(self, other: Bounds) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        let b = Self::new(x0, y0, x1 - x0, y1 - y0);
        if b.is_empty() { Self::default() } else { b }
    }

    /// Smallest bounds that contain both.
    #[inline]
    pub fn union(self, other: Bounds) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Smallest bounds containing `self` and the cell `p`.
    #[inline]
    pub fn include_point(self, p: Point) -> Self {
        self.union(Self::new(p.x, p.y, 1, 1))
    }

    /// Whether the two bounds share at least one cell.
    #[inline]
    pub fn overlaps(self, other: Bounds) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Row-major iterator over every point in the bounds.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.origin(),
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Point;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{} {}x{}]", self.x, self.y, self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Point,
}

impl Iterator for BoundsIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.bottom() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.right() {
            self.cur.x = self.bounds.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.bottom() {
            return (0, Some(0));
        }
        let w = self.bounds.width as usize;
        let remaining_in_row = (self.bounds.right() - self.cur.x) as usize;
        let remaining_rows = (self.bounds.bottom() - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a * 3, Point::new(3, 6));
        assert_eq!(-a, Point::new(-1, -2));
    }

    #[test]
    fn point_order_is_row_major() {
        let mut pts = vec![Point::new(2, 1), Point::new(0, 2), Point::new(5, 0)];
        pts.sort();
        assert_eq!(
            pts,
            vec![Point::new(5, 0), Point::new(2, 1), Point::new(0, 2)]
        );
    }

    #[test]
    fn neighbors_follow_dir_order() {
        let p = Point::new(3, 3);
        assert_eq!(p.neighbors_4()[0], Point::new(3, 2));
        assert_eq!(p.neighbors_8()[4], Point::new(4, 2));
        assert_eq!(p.neighbors_8()[7], Point::new(2, 2));
    }

    #[test]
    fn bounds_edges_and_center() {
        let b = Bounds::new(2, 3, 4, 6);
        assert_eq!(b.left(), 2);
        assert_eq!(b.top(), 3);
        assert_eq!(b.right(), 6);
        assert_eq!(b.bottom(), 9);
        assert_eq!(b.center(), Point::new(4, 6));
        assert_eq!(b.len(), 24);
    }

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::sized(3, 2);
        assert!(b.contains(Point::new(0, 0)));
        assert!(b.contains(Point::new(2, 1)));
        assert!(!b.contains(Point::new(3, 0)));
        assert!(!b.contains(Point::new(0, 2)));
        assert!(!b.contains(Point::new(-1, 0)));
    }

    #[test]
    fn bounds_negative_size_is_empty() {
        let b = Bounds::new(4, 4, -3, 2);
        assert!(b.is_empty());
        assert_eq!(b.iter().count(), 0);
    }

    #[test]
    fn bounds_from_corners() {
        let b = Bounds::from_corners(Point::new(4, 1), Point::new(1, 3));
        assert_eq!(b, Bounds::new(1, 1, 4, 3));
    }

    #[test]
    fn bounds_iter_row_major() {
        let pts: Vec<_> = Bounds::new(1, 1, 3, 2).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(1, 1));
        assert_eq!(pts[2], Point::new(3, 1));
        assert_eq!(pts[3], Point::new(1, 2));
        assert_eq!(Bounds::new(1, 1, 3, 2).iter().len(), 6);
    }

    #[test]
    fn bounds_intersect_and_union() {
        let a = Bounds::new(0, 0, 4, 4);
        let b = Bounds::new(2, 2, 4, 4);
        assert_eq!(a.intersect(b), Bounds::new(2, 2, 2, 2));
        assert_eq!(a.union(b), Bounds::new(0, 0, 6, 6));
        let far = Bounds::new(10, 10, 1, 1);
        assert!(a.intersect(far).is_empty());
        assert!(!a.overlaps(far));
        assert_eq!(Bounds::default().union(far), far);
    }

    #[test]
    fn bounds_include_point_grows() {
        let b = Bounds::default()
            .include_point(Point::new(3, 4))
            .include_point(Point::new(1, 6));
        assert_eq!(b, Bounds::new(1, 4, 3, 3));
    }

    #[test]
    fn bounds_pad_and_within() {
        let b = Bounds::new(2, 2, 3, 3);
        assert_eq!(b.pad(1), Bounds::new(1, 1, 5, 5));
        assert!(b.pad(-2).is_empty());
        assert!(b.within(b.pad(1)));
        assert!(!b.pad(1).within(b));
        assert!(Bounds::default().within(b));
    }

    #[test]
    fn empty_bounds_compare_and_hash_equal() {
        let a = Bounds::default();
        let b = Bounds::new(7, 7, 0, 3);
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert_ne!(a, Bounds::new(0, 0, 1, 1));
    }
}
