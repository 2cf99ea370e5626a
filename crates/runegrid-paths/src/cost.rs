//! Movement costs, distance values and the raw sentinel bands behind them.
//!
//! Costs and distances are stored as `f64` internally. The enums here give
//! the threshold bands names:
//!
//! | raw value | cost | distance |
//! |---|---|---|
//! | `< 0` | [`MovementCost::Forbidden`] | |
//! | `< BLOCKED` | [`MovementCost::Passable`] | [`Distance::Finite`] |
//! | `BLOCKED..OBSTRUCTION` | [`MovementCost::Blocked`] | [`Distance::Blocked`] |
//! | `OBSTRUCTION..NOT_DONE` | [`MovementCost::Obstruction`] | [`Distance::Obstructed`] |
//! | `>= NOT_DONE` | | [`Distance::Unreached`] |

use runegrid_core::{Dir, Grid, Point};

/// Raw distance of a cell no search has reached.
pub const NOT_DONE: f64 = 30000.0;
/// Raw cost of an ordinary floor cell.
pub const OK: f64 = 1.0;
/// Raw cost of a cell that is walkable but best avoided.
pub const AVOIDED: f64 = 10.0;
/// Raw cost at and above which a cell cannot be entered.
pub const BLOCKED: f64 = 10000.0;
/// Raw cost at and above which a cell also blocks diagonal moves past it.
pub const OBSTRUCTION: f64 = 20000.0;

/// Multiplier applied to the cost of a diagonal step.
pub const DIAGONAL_STEP: f64 = 1.4;

/// The cost of entering a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementCost {
    /// Walkable at the given cost. Values are expected in `0..BLOCKED`.
    Passable(f64),
    /// Never entered, and never given a distance.
    Forbidden,
    /// Cannot be entered.
    Blocked,
    /// Cannot be entered, and diagonal moves may not cut past it.
    Obstruction,
}

impl MovementCost {
    pub const OK: Self = Self::Passable(OK);
    pub const AVOIDED: Self = Self::Passable(AVOIDED);

    /// Classify a raw cost into its band.
    pub fn from_raw(raw: f64) -> Self {
        if raw < 0.0 {
            Self::Forbidden
        } else if raw >= OBSTRUCTION {
            Self::Obstruction
        } else if raw >= BLOCKED {
            Self::Blocked
        } else {
            Self::Passable(raw)
        }
    }

    /// The raw value of this cost. Out-of-band `Passable` values are
    /// returned unchanged, so they land in whatever band they fall in.
    pub fn raw(self) -> f64 {
        match self {
            Self::Passable(c) => c,
            Self::Forbidden => -1.0,
            Self::Blocked => BLOCKED,
            Self::Obstruction => OBSTRUCTION,
        }
    }

    /// Whether a cell of this cost can be entered.
    pub fn is_passable(self) -> bool {
        (0.0..BLOCKED).contains(&self.raw())
    }

    /// Whether diagonal moves are forbidden from cutting past this cell.
    pub fn blocks_diagonal(self) -> bool {
        self.raw() >= OBSTRUCTION
    }
}

impl From<f64> for MovementCost {
    fn from(raw: f64) -> Self {
        Self::from_raw(raw)
    }
}

/// The distance of a cell in a [`DijkstraMap`](crate::DijkstraMap).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    /// Reachable at this accumulated cost.
    Finite(f64),
    /// A blocked cell adjacent to the reached area.
    Blocked,
    /// An obstruction adjacent to the reached area.
    Obstructed,
    /// Not reached by any search.
    Unreached,
}

impl Distance {
    pub fn from_raw(raw: f64) -> Self {
        if raw >= NOT_DONE {
            Self::Unreached
        } else if raw >= OBSTRUCTION {
            Self::Obstructed
        } else if raw >= BLOCKED {
            Self::Blocked
        } else {
            Self::Finite(raw)
        }
    }

    pub fn raw(self) -> f64 {
        match self {
            Self::Finite(d) => d,
            Self::Blocked => BLOCKED,
            Self::Obstructed => OBSTRUCTION,
            Self::Unreached => NOT_DONE,
        }
    }

    /// The finite distance, if any.
    pub fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

/// Per-cell movement cost supplied by the caller.
///
/// Must be a pure function of position for the duration of one
/// calculation or search. Implemented for closures `Fn(Point) ->
/// MovementCost` and for cost grids, which report
/// [`MovementCost::Obstruction`] outside their bounds.
pub trait CostFn {
    fn cost(&self, p: Point) -> MovementCost;
}

impl<F: Fn(Point) -> MovementCost> CostFn for F {
    #[inline]
    fn cost(&self, p: Point) -> MovementCost {
        self(p)
    }
}

impl CostFn for Grid<MovementCost> {
    #[inline]
    fn cost(&self, p: Point) -> MovementCost {
        self.at(p).unwrap_or(MovementCost::Obstruction)
    }
}

// ---------------------------------------------------------------------------
// Step rules shared by the Dijkstra map and A*
// ---------------------------------------------------------------------------

/// What a single step from one cell into a neighbour amounts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// The neighbour can be entered; the step costs this much.
    Enter(f64),
    /// The neighbour is impassable; its distance clamps to this sentinel.
    Clamp(f64),
    /// The step is not allowed at all.
    Skip,
}

/// Whether a diagonal move from `from` along `dir` cuts past an
/// obstruction on either orthogonal corner.
pub(crate) fn cuts_corner<C: CostFn + ?Sized>(cost: &C, from: Point, dir: Dir) -> bool {
    match dir.corners() {
        Some((h, v)) => {
            cost.cost(from.step(h)).blocks_diagonal() || cost.cost(from.step(v)).blocks_diagonal()
        }
        None => false,
    }
}

/// Classify the step from `from` along `dir`.
pub(crate) fn step<C: CostFn + ?Sized>(cost: &C, from: Point, dir: Dir) -> Step {
    let raw = cost.cost(from.step(dir)).raw();
    if raw < 0.0 {
        return Step::Skip;
    }
    if dir.is_diagonal() && cuts_corner(cost, from, dir) {
        return Step::Skip;
    }
    if raw >= OBSTRUCTION {
        Step::Clamp(OBSTRUCTION)
    } else if raw >= BLOCKED {
        Step::Clamp(BLOCKED)
    } else if dir.is_diagonal() {
        Step::Enter(raw * DIAGONAL_STEP)
    } else {
        Step::Enter(raw)
    }
}
