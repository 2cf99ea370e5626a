//! Field of view by recursive shadow casting.
//!
//! [`Shadowcast`] scans the eight octants around an origin row by row,
//! narrowing a cone of visible slopes whenever it meets an opaque cell.
//! Visibility is reported through a callback with a linear brightness
//! falloff `1 - r / max_radius`, where `r` comes from a pluggable
//! [`DistanceMetric`]. [`FovMap`] stores the result in a grid.

use std::collections::HashSet;

use runegrid_core::{Bounds, DIRS, DistanceMetric, Euclidean, Grid, Point};

/// Which cells stop light.
pub trait Blocking {
    fn is_blocked(&self, p: Point) -> bool;
}

impl<F: Fn(Point) -> bool> Blocking for F {
    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        self(p)
    }
}

/// The cells that exist. Cells outside the domain are opaque and never
/// reported.
pub trait Domain {
    fn has_xy(&self, p: Point) -> bool;
}

impl Domain for Bounds {
    #[inline]
    fn has_xy(&self, p: Point) -> bool {
        self.contains(p)
    }
}

impl<T> Domain for Grid<T> {
    #[inline]
    fn has_xy(&self, p: Point) -> bool {
        Grid::has_xy(self, p)
    }
}

/// A [`Domain`] given by a predicate, for maps that are not rectangles.
#[derive(Debug, Clone, Copy)]
pub struct DomainFn<F>(pub F);

impl<F: Fn(Point) -> bool> Domain for DomainFn<F> {
    #[inline]
    fn has_xy(&self, p: Point) -> bool {
        (self.0)(p)
    }
}

// ---------------------------------------------------------------------------
// Shadowcast
// ---------------------------------------------------------------------------

/// Recursive shadow-casting field of view.
#[derive(Debug, Clone)]
pub struct Shadowcast<B, D, M = Euclidean> {
    blocking: B,
    domain: D,
    metric: M,
}

/// Maps octant-local `(dx, dy)` onto map offsets.
#[derive(Clone, Copy)]
struct Octant {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

impl Octant {
    #[inline]
    fn apply(self, origin: Point, dx: i32, dy: i32) -> Point {
        origin.shift(dx * self.xx + dy * self.xy, dx * self.yx + dy * self.yy)
    }
}

struct Scan<F> {
    origin: Point,
    max_radius: f64,
    seen: HashSet<Point>,
    callback: F,
}

impl<B: Blocking, D: Domain> Shadowcast<B, D> {
    pub fn new(blocking: B, domain: D) -> Self {
        Self {
            blocking,
            domain,
            metric: Euclidean,
        }
    }
}

impl<B: Blocking, D: Domain, M: DistanceMetric> Shadowcast<B, D, M> {
    /// Replace the distance metric used for the radius cutoff and falloff.
    pub fn with_metric<N: DistanceMetric>(self, metric: N) -> Shadowcast<B, D, N> {
        Shadowcast {
            blocking: self.blocking,
            domain: self.domain,
            metric,
        }
    }

    /// Compute the view from `origin`, calling `callback(cell, brightness)`
    /// once per visible cell. The origin comes first, at brightness 1.0.
    /// Returns the number of cells reported.
    ///
    /// # Panics
    ///
    /// If `max_radius` is not positive.
    pub fn calculate(
        &self,
        origin: Point,
        max_radius: f64,
        callback: impl FnMut(Point, f64),
    ) -> usize {
        assert!(
            max_radius > 0.0,
            "shadowcast radius must be positive, got {max_radius}"
        );
        let mut scan = Scan {
            origin,
            max_radius,
            seen: HashSet::from([origin]),
            callback,
        };
        (scan.callback)(origin, 1.0);
        for d in &DIRS[4..] {
            let octants = [
                Octant {
                    xx: 0,
                    xy: d.x,
                    yx: d.y,
                    yy: 0,
                },
                Octant {
                    xx: d.x,
                    xy: 0,
                    yx: 0,
                    yy: d.y,
                },
            ];
            for oct in octants {
                self.cast(&mut scan, 1, 1.0, 0.0, oct);
            }
        }
        let n = scan.seen.len();
        log::trace!("shadowcast: {n} cells visible from {origin} within {max_radius}");
        n
    }

    fn cast<F: FnMut(Point, f64)>(
        &self,
        scan: &mut Scan<F>,
        row: i32,
        mut start: f64,
        end: f64,
        oct: Octant,
    ) {
        let fr = f64::from(row);
        if fr > scan.max_radius || start < end {
            return;
        }
        let dy = -row;
        let fdy = f64::from(dy);
        let mut next = start;
        let mut blocked = false;
        for dx in -row..=0 {
            let fdx = f64::from(dx);
            let outer = (fdx - 0.5) / (fdy + 0.5);
            let inner = (fdx + 0.5) / (fdy - 0.5);
            let max_slope = fdx / (fdy + 0.5);
            let min_slope = (fdx + 0.5) / fdy;
            if start < min_slope {
                continue;
            } else if end > max_slope {
                break;
            }

            let cell = oct.apply(scan.origin, dx, dy);
            let in_domain = self.domain.has_xy(cell);
            let opaque = !in_domain || self.blocking.is_blocked(cell);
            let offset = cell - scan.origin;
            let r = self.metric.radius(offset.x, offset.y);
            if in_domain && r <= scan.max_radius && scan.seen.insert(cell) {
                (scan.callback)(cell, 1.0 - r / scan.max_radius);
            }

            if blocked {
                if opaque {
                    next = inner;
                    continue;
                }
                blocked = false;
                start = next;
            } else if opaque && fr < scan.max_radius {
                blocked = true;
                self.cast(scan, row + 1, next, outer, oct);
                next = inner;
            }
        }
        if !blocked {
            self.cast(scan, row + 1, next, end, oct);
        }
    }
}

// ---------------------------------------------------------------------------
// FovMap
// ---------------------------------------------------------------------------

const DARK: f64 = -1.0;

/// Per-cell brightness from the last [`compute`](FovMap::compute).
#[derive(Debug, Clone)]
pub struct FovMap {
    light: Grid<f64>,
}

impl FovMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            light: Grid::new(width, height, DARK),
        }
    }

    /// Recompute the view from `origin`, using this map's bounds as the
    /// domain. Returns the number of visible cells.
    pub fn compute(&mut self, blocking: impl Blocking, origin: Point, max_radius: f64) -> usize {
        self.compute_with(blocking, Euclidean, origin, max_radius)
    }

    /// Like [`compute`](Self::compute), with a custom distance metric.
    pub fn compute_with(
        &mut self,
        blocking: impl Blocking,
        metric: impl DistanceMetric,
        origin: Point,
        max_radius: f64,
    ) -> usize {
        self.light.fill(DARK);
        let fov = Shadowcast::new(blocking, self.light.bounds()).with_metric(metric);
        let light = &mut self.light;
        fov.calculate(origin, max_radius, |p, b| {
            light.set(p, b);
        });
        self.visible_count()
    }

    /// Forget the last view.
    pub fn clear(&mut self) {
        self.light.fill(DARK);
    }

    pub fn is_visible(&self, p: Point) -> bool {
        self.brightness(p).is_some()
    }

    /// Brightness of a visible cell; `None` when not visible or outside.
    pub fn brightness(&self, p: Point) -> Option<f64> {
        self.light.at(p).filter(|&b| b >= 0.0)
    }

    pub fn visible_count(&self) -> usize {
        self.light.count(|_, &b| b >= 0.0)
    }

    /// Visible cells in row-major order.
    pub fn iter_visible(&self) -> impl Iterator<Item = Point> + '_ {
        self.light.iter().filter(|&(_, &b)| b >= 0.0).map(|(p, _)| p)
    }

    pub fn width(&self) -> i32 {
        self.light.width()
    }

    pub fn height(&self) -> i32 {
        self.light.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use runegrid_core::Chebyshev;

    fn visible_set<B: Blocking, D: Domain>(
        fov: &Shadowcast<B, D>,
        origin: Point,
        radius: f64,
    ) -> HashSet<Point> {
        let mut set = HashSet::new();
        fov.calculate(origin, radius, |p, _| {
            set.insert(p);
        });
        set
    }

    #[test]
    fn open_field_is_a_disc() {
        let bounds = Bounds::sized(21, 21);
        let origin = Point::new(10, 10);
        let fov = Shadowcast::new(|_: Point| false, bounds);
        for radius in [1.0, 2.0, 3.0, 5.0, 7.0, 8.5] {
            let expected: HashSet<Point> = bounds
                .iter()
                .filter(|&p| {
                    let d = p - origin;
                    Euclidean.radius(d.x, d.y) <= radius
                })
                .collect();
            assert_eq!(
                visible_set(&fov, origin, radius),
                expected,
                "radius {radius}"
            );
        }
    }

    #[test]
    fn origin_first_at_full_brightness() {
        let fov = Shadowcast::new(|_: Point| false, Bounds::sized(16, 16));
        let mut calls = Vec::new();
        fov.calculate(Point::new(5, 5), 8.0, |p, b| calls.push((p, b)));
        assert_eq!(calls[0], (Point::new(5, 5), 1.0));
        let right = calls.iter().find(|(p, _)| *p == Point::new(6, 5));
        assert_eq!(right.map(|&(_, b)| b), Some(0.875));
    }

    #[test]
    fn each_cell_reported_once() {
        let fov = Shadowcast::new(|_: Point| false, Bounds::sized(30, 30));
        let mut calls = Vec::new();
        let n = fov.calculate(Point::new(15, 15), 9.0, |p, _| calls.push(p));
        let unique: HashSet<Point> = calls.iter().copied().collect();
        assert_eq!(unique.len(), calls.len());
        assert_eq!(n, calls.len());
    }

    #[test]
    fn wall_casts_shadow() {
        let wall = Point::new(8, 5);
        let fov = Shadowcast::new(move |p: Point| p == wall, Bounds::sized(20, 20));
        let seen = visible_set(&fov, Point::new(5, 5), 8.0);
        assert!(seen.contains(&wall));
        for p in [(9, 5), (10, 5), (11, 5)] {
            assert!(!seen.contains(&Point::from(p)), "{p:?} should be hidden");
        }
        for p in [(8, 4), (8, 6), (9, 3), (10, 4)] {
            assert!(seen.contains(&Point::from(p)), "{p:?} should be visible");
        }
    }

    #[test]
    fn adjacent_wall_keeps_sides_visible() {
        let wall = Point::new(6, 5);
        let fov = Shadowcast::new(move |p: Point| p == wall, Bounds::sized(16, 16));
        let seen = visible_set(&fov, Point::new(5, 5), 8.0);
        assert!(!seen.contains(&Point::new(7, 5)));
        assert!(!seen.contains(&Point::new(8, 5)));
        for p in [(6, 5), (6, 4), (6, 6), (5, 4), (4, 5), (5, 3), (10, 0)] {
            assert!(seen.contains(&Point::from(p)), "{p:?} should be visible");
        }
    }

    #[test]
    fn wall_line_hides_everything_behind() {
        let fov = Shadowcast::new(|p: Point| p.x == 7, Bounds::sized(15, 15));
        let seen = visible_set(&fov, Point::new(5, 5), 8.0);
        assert!(seen.iter().all(|p| p.x < 8));
        for y in 4..=6 {
            assert!(seen.contains(&Point::new(7, y)));
        }
    }

    #[test]
    fn domain_limits_reports() {
        let bounds = Bounds::sized(5, 5);
        let fov = Shadowcast::new(|_: Point| false, bounds);
        let seen = visible_set(&fov, Point::new(2, 2), 10.0);
        assert_eq!(seen, bounds.iter().collect());
    }

    #[test]
    fn predicate_domain() {
        // A plus-shaped corridor.
        let domain = DomainFn(|p: Point| (p.x == 5) != (p.y == 5) || p == Point::new(5, 5));
        let fov = Shadowcast::new(|_: Point| false, domain);
        let mut seen = Vec::new();
        fov.calculate(Point::new(5, 5), 3.0, |p, _| seen.push(p));
        assert_eq!(seen.len(), 13);
        assert!(seen.iter().all(|p| p.x == 5 || p.y == 5));
    }

    #[test]
    fn chebyshev_metric_gives_square() {
        let fov = Shadowcast::new(|_: Point| false, Bounds::sized(11, 11)).with_metric(Chebyshev);
        let mut n = 0;
        fov.calculate(Point::new(5, 5), 3.0, |p, b| {
            n += 1;
            assert!((p.x - 5).abs() <= 3 && (p.y - 5).abs() <= 3);
            assert!((0.0..=1.0).contains(&b));
        });
        assert_eq!(n, 49);
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn zero_radius_panics() {
        let fov = Shadowcast::new(|_: Point| false, Bounds::sized(3, 3));
        fov.calculate(Point::new(1, 1), 0.0, |_, _| {});
    }

    #[test]
    fn random_walls_stay_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let w = rng.random_range(5..30);
            let h = rng.random_range(5..30);
            let mut walls = Grid::new(w, h, false);
            walls.update(|_, _| rng.random_range(0..5) == 0);
            let origin = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            walls.set(origin, false);
            let radius = [1.0, 2.5, 4.0, 6.0, 9.0, 12.0][rng.random_range(0..6)];

            let fov = Shadowcast::new(|p: Point| walls.at(p).unwrap_or(true), walls.bounds());
            let mut calls = Vec::new();
            fov.calculate(origin, radius, |p, b| calls.push((p, b)));

            assert_eq!(calls[0], (origin, 1.0));
            let unique: HashSet<Point> = calls.iter().map(|&(p, _)| p).collect();
            assert_eq!(unique.len(), calls.len());
            for &(p, b) in &calls {
                assert!(walls.has_xy(p));
                assert!((0.0..=1.0).contains(&b));
            }
            // Adjacent cells are always visible.
            for n in origin.neighbors_8() {
                let d = n - origin;
                if walls.has_xy(n) && Euclidean.radius(d.x, d.y) <= radius {
                    assert!(unique.contains(&n), "{n} next to {origin}");
                }
            }
        }
    }

    #[test]
    fn fov_map_tracks_brightness() {
        let wall = Point::new(6, 5);
        let mut map = FovMap::new(12, 12);
        let n = map.compute(move |p: Point| p == wall, Point::new(5, 5), 8.0);
        assert_eq!(n, map.visible_count());
        assert_eq!(map.brightness(Point::new(5, 5)), Some(1.0));
        assert!(map.is_visible(wall));
        assert!(!map.is_visible(Point::new(8, 5)));
        assert_eq!(map.brightness(Point::new(-1, 0)), None);
        assert_eq!(map.iter_visible().count(), n);

        map.compute(|_: Point| false, Point::new(0, 0), 1.0);
        assert_eq!(map.visible_count(), 3);
        assert!(!map.is_visible(Point::new(5, 5)));
        map.clear();
        assert_eq!(map.visible_count(), 0);
    }

    #[test]
    fn fov_map_edge_cells_are_visible_at_zero() {
        let mut map = FovMap::new(9, 9);
        map.compute(|_: Point| false, Point::new(4, 4), 3.0);
        assert_eq!(map.brightness(Point::new(7, 4)), Some(0.0));
    }
}
