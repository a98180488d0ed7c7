//! **stargrid-core** — core geometry types for grid pathfinding.
//!
//! This crate provides the integer [`Point`] primitive shared across the
//! *stargrid* workspace: arithmetic, ordering, display, and cardinal /
//! diagonal neighbor enumeration.

pub mod geom;

pub use geom::Point;
