//! Pathfinding over weighted grids.
//!
//! - **Dijkstra maps** ([`DijkstraMap`]): multi-source distance fields with
//!   incremental rescans, obstacle penalties and downhill path following.
//! - **A\*** ([`astar::search`]): single-goal shortest paths.
//!
//! Both take a caller-supplied [`CostFn`] and share the same step rules:
//! diagonal steps cost 1.4 times the entered cell and never cut past an
//! [`MovementCost::Obstruction`].
//!
//! # Cost bands
//!
//! | Cost | Enterable | Blocks diagonals |
//! |---|---|---|
//! | [`MovementCost::Passable`] | yes | no |
//! | [`MovementCost::Forbidden`] | no | no |
//! | [`MovementCost::Blocked`] | no | no |
//! | [`MovementCost::Obstruction`] | no | yes |

pub mod astar;
mod config;
mod cost;
mod dijkstra;

pub use astar::{path_cost, search, search_with, search_within};
pub use config::PathConfig;
pub use cost::{
    AVOIDED, BLOCKED, CostFn, DIAGONAL_STEP, Distance, MovementCost, NOT_DONE, OBSTRUCTION, OK,
};
pub use dijkstra::DijkstraMap;
