//! Fixed-point line stepping.
//!
//! [`LineStepper`] walks from one cell towards another, one cell per step
//! along the major axis. The minor-axis position is carried as a 16.16
//! fixed-point value plus an exact remainder below the fixed-point unit, so
//! every rounding decision is the one exact rational Bresenham would make,
//! whatever the line length.
//!
//! Exact half-way positions round away from the lesser endpoint (in
//! [`Point`] order). The rule depends only on the pair of endpoints, so
//! walking `a → b` and `b → a` visits the same cells.

use crate::geom::Point;

const FP_BASE: u32 = 16;
const FP_ONE: i64 = 1 << FP_BASE;
const FP_HALF: i64 = FP_ONE >> 1;

/// Iterator over the cells on the ray from `from` through `to`.
///
/// The origin itself is not yielded. The iterator does not stop at `to`: it
/// keeps extending the ray, so callers bound it with `take_while` or use
/// [`for_line_between`] / [`for_ray`].
#[derive(Clone, Debug)]
pub struct LineStepper {
    origin: Point,
    x_major: bool,
    major_sign: i32,
    minor_sign: i32,
    major_len: i64,
    inc_whole: i64,
    inc_frac: i64,
    inc_rem: i64,
    whole: i64,
    frac: i64,
    rem: i64,
    steps: i64,
    round_ties_up: bool,
}

impl LineStepper {
    /// A stepper for the ray `from → to`. Yields nothing when the two points
    /// coincide.
    pub fn new(from: Point, to: Point) -> Self {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        let x_major = dx.abs() >= dy.abs();
        let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
        let major_len = major.abs();
        let (inc_whole, inc_frac, inc_rem) = if major_len == 0 {
            (0, 0, 0)
        } else {
            let scaled = minor.abs() << FP_BASE;
            let q = scaled / major_len;
            (q >> FP_BASE, q & (FP_ONE - 1), scaled % major_len)
        };
        Self {
            origin: from,
            x_major,
            major_sign: if major < 0 { -1 } else { 1 },
            minor_sign: if minor < 0 { -1 } else { 1 },
            major_len,
            inc_whole,
            inc_frac,
            inc_rem,
            whole: 0,
            frac: 0,
            rem: 0,
            steps: 0,
            round_ties_up: from < to,
        }
    }

    /// Number of steps taken so far.
    #[inline]
    pub fn steps(&self) -> i64 {
        self.steps
    }

    fn minor_offset(&self) -> i64 {
        let above_half = self.frac > FP_HALF || (self.frac == FP_HALF && self.rem > 0);
        let tie = self.frac == FP_HALF && self.rem == 0;
        if above_half || (tie && self.round_ties_up) {
            self.whole + 1
        } else {
            self.whole
        }
    }
}

impl Iterator for LineStepper {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.major_len == 0 {
            return None;
        }
        self.steps += 1;
        self.frac += self.inc_frac;
        self.rem += self.inc_rem;
        if self.rem >= self.major_len {
            self.rem -= self.major_len;
            self.frac += 1;
        }
        if self.frac >= FP_ONE {
            self.frac -= FP_ONE;
            self.whole += 1;
        }
        self.whole += self.inc_whole;

        let major = (self.steps * i64::from(self.major_sign)) as i32;
        let minor = (self.minor_offset() * i64::from(self.minor_sign)) as i32;
        Some(if self.x_major {
            self.origin.shift(major, minor)
        } else {
            self.origin.shift(minor, major)
        })
    }
}

/// Call `f` for each cell after `from` up to and including `to`, stopping
/// early when `f` returns `false`. Returns `true` if `to` was reached.
pub fn for_line_between(from: Point, to: Point, mut f: impl FnMut(Point) -> bool) -> bool {
    for p in LineStepper::new(from, to) {
        if !f(p) {
            return false;
        }
        if p == to {
            return true;
        }
    }
    true
}

/// All cells of the segment `from..=to`, both endpoints included.
pub fn line_between(from: Point, to: Point) -> Vec<Point> {
    let n = (from.x - to.x).abs().max((from.y - to.y).abs()) as usize;
    let mut pts = Vec::with_capacity(n + 1);
    pts.push(from);
    for_line_between(from, to, |p| {
        pts.push(p);
        true
    });
    pts
}

/// Walk the open-ended ray from `from` through `toward`, calling `f` on each
/// cell while `within` accepts it. Stops at the first cell outside the
/// domain or when `f` returns `false`. Returns the last cell visited.
pub fn for_ray(
    from: Point,
    toward: Point,
    within: impl Fn(Point) -> bool,
    mut f: impl FnMut(Point) -> bool,
) -> Option<Point> {
    let mut last = None;
    for p in LineStepper::new(from, toward) {
        if !within(p) {
            break;
        }
        last = Some(p);
        if !f(p) {
            break;
        }
    }
    last
}
