//! The eight grid directions.
//!
//! [`DIRS`] lists orthogonal directions first (indices 0–3, clockwise from
//! up) then diagonals (4–7, clockwise from up-right), so restricting a search
//! to 4-way movement is just taking the first four entries. [`CLOCK_DIRS`]
//! is the same set as a single clockwise ring, where `(i + 4) % 8` is the
//! opposite direction.

use crate::geom::Point;

/// Direction deltas, orthogonal first.
pub const DIRS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Direction deltas as a clockwise ring starting at up.
pub const CLOCK_DIRS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

/// One of the eight grid directions. The discriminant is the index into
/// [`DIRS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
    UpRight = 4,
    DownRight = 5,
    DownLeft = 6,
    UpLeft = 7,
}

impl Dir {
    /// All directions in [`DIRS`] order.
    pub const ALL: [Dir; 8] = [
        Dir::Up,
        Dir::Right,
        Dir::Down,
        Dir::Left,
        Dir::UpRight,
        Dir::DownRight,
        Dir::DownLeft,
        Dir::UpLeft,
    ];

    /// The orthogonal directions.
    pub const CARDINAL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    /// The diagonal directions.
    pub const DIAGONAL: [Dir; 4] = [Dir::UpRight, Dir::DownRight, Dir::DownLeft, Dir::UpLeft];

    /// Directions to try for a search: all eight, or only the orthogonal
    /// ones.
    #[inline]
    pub fn moves(diagonals: bool) -> &'static [Dir] {
        if diagonals {
            &Self::ALL
        } else {
            &Self::CARDINAL
        }
    }

    /// Index into [`DIRS`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at `i` in [`DIRS`] order, if `i < 8`.
    #[inline]
    pub fn from_index(i: usize) -> Option<Dir> {
        Self::ALL.get(i).copied()
    }

    #[inline]
    pub const fn delta(self) -> Point {
        DIRS[self as usize]
    }

    /// Direction matching a unit delta, e.g. `(1, -1)` → `UpRight`.
    pub fn from_delta(d: Point) -> Option<Dir> {
        let i = DIRS.iter().position(|&p| p == d)?;
        Self::from_index(i)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self as usize >= 4
    }

    /// Rotate 90° clockwise within the same group (orthogonal or diagonal).
    #[inline]
    pub const fn rotate_cw(self) -> Dir {
        let i = self as usize;
        Self::ALL[(i & 4) | ((i + 1) % 4)]
    }

    /// Rotate 90° counter-clockwise within the same group.
    #[inline]
    pub const fn rotate_ccw(self) -> Dir {
        let i = self as usize;
        Self::ALL[(i & 4) | ((i + 3) % 4)]
    }

    #[inline]
    pub const fn opposite(self) -> Dir {
        let i = self as usize;
        Self::ALL[(i & 4) | ((i + 2) % 4)]
    }

    /// The two orthogonal components of a diagonal direction, horizontal
    /// first. `None` for orthogonal directions.
    #[inline]
    pub fn corners(self) -> Option<(Dir, Dir)> {
        let d = self.delta();
        if !self.is_diagonal() {
            return None;
        }
        let h = if d.x > 0 { Dir::Right } else { Dir::Left };
        let v = if d.y > 0 { Dir::Down } else { Dir::Up };
        Some((h, v))
    }
}

/// Index into [`CLOCK_DIRS`] of the opposite of clock direction `i`.
#[inline]
pub const fn clock_opposite(i: usize) -> usize {
    (i + 4) % 8
}
