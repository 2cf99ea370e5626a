//! Circle and ring rasterization.
//!
//! A cell at offset `(dx, dy)` belongs to the disc of radius `r` when
//! `dx² + dy² < r² + r`. The extra `+ r` softens the edge so that small
//! integer radii come out round instead of diamond-like.

use crate::geom::Point;

#[inline]
fn sq(n: i32) -> i64 {
    i64::from(n) * i64::from(n)
}

/// Call `f` for every cell of the disc of `radius` around `center`, in
/// row-major order. A radius of 0 or less covers no cells.
pub fn for_circle(center: Point, radius: i32, mut f: impl FnMut(Point)) {
    if radius <= 0 {
        return;
    }
    let limit = sq(radius) + i64::from(radius);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if sq(dx) + sq(dy) < limit {
                f(center.shift(dx, dy));
            }
        }
    }
}

/// Call `f` for every cell of the ring `prev_radius² <= d² < radius² +
/// radius` around `center`, in row-major order.
///
/// Used for ring-by-ring expansion: with `prev_radius = 0` this is the full
/// disc of [`for_circle`].
pub fn for_radius(center: Point, radius: i32, prev_radius: i32, mut f: impl FnMut(Point)) {
    if radius < 0 {
        return;
    }
    let inner = sq(prev_radius.max(0));
    let limit = sq(radius) + i64::from(radius);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = sq(dx) + sq(dy);
            if d2 >= inner && d2 < limit {
                f(center.shift(dx, dy));
            }
        }
    }
}

/// Collect the cells of [`for_circle`].
pub fn circle_points(center: Point, radius: i32) -> Vec<Point> {
    let mut pts = Vec::new();
    for_circle(center, radius, |p| pts.push(p));
    pts
}
