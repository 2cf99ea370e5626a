//! Distance metrics.

use crate::geom::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Euclidean distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    f64::from(a.x - b.x).hypot(f64::from(a.y - b.y))
}

/// The "game distance" used for movement: `dx + dy - 0.6 * min(dx, dy)`.
///
/// A diagonal step counts 1.4 and an orthogonal one 1, which is the octile
/// distance under the 1.4 diagonal multiplier used by the path searches.
#[inline]
pub fn distance_between(a: Point, b: Point) -> f64 {
    blended(a.x - b.x, a.y - b.y)
}

#[inline]
fn blended(dx: i32, dy: i32) -> f64 {
    let dx = f64::from(dx.abs());
    let dy = f64::from(dy.abs());
    dx + dy - 0.6 * dx.min(dy)
}

/// A distance metric over a `(dx, dy)` offset.
pub trait DistanceMetric {
    fn radius(&self, dx: i32, dy: i32) -> f64;
}

/// Euclidean metric, `sqrt(dx² + dy²)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    #[inline]
    fn radius(&self, dx: i32, dy: i32) -> f64 {
        f64::from(dx).hypot(f64::from(dy))
    }
}

/// The blended metric of [`distance_between`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Blended;

impl DistanceMetric for Blended {
    #[inline]
    fn radius(&self, dx: i32, dy: i32) -> f64 {
        blended(dx, dy)
    }
}

/// Chebyshev metric; produces square areas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl DistanceMetric for Chebyshev {
    #[inline]
    fn radius(&self, dx: i32, dy: i32) -> f64 {
        f64::from(dx.abs().max(dy.abs()))
    }
}

impl<F: Fn(i32, i32) -> f64> DistanceMetric for F {
    #[inline]
    fn radius(&self, dx: i32, dy: i32) -> f64 {
        self(dx, dy)
    }
}
