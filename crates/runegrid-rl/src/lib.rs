//! Roguelike utilities for runegrid: field of view.

pub mod fov;

pub use fov::{Blocking, Domain, DomainFn, FovMap, Shadowcast};
