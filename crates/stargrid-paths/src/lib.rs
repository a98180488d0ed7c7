//! A* pathfinding on 2D grids with per-cell change notification.
//!
//! The engine owns a fixed grid of [`Node`]s, each carrying its search
//! state (classification, costs, parent link) and an optional observer
//! fired on every display-relevant mutation:
//!
//! - **[`Pathfinder`]** — grid construction, cell designation
//!   (start / end / barrier), connectivity mode, and the
//!   [`find_path`](Pathfinder::find_path) A* entry point
//! - **[`SearchControl`]** — cooperative pause / cancel for searches
//!   driven from a worker thread
//! - **[`octile`]** — the scaled integer distance model (cardinal 10,
//!   diagonal 14) used as both heuristic and step cost
//!
//! The search runs synchronously to completion and returns the full
//! start→end point sequence, or `Ok(None)` when no path exists.

mod astar;
mod control;
mod distance;
mod error;
mod node;
mod pathfinder;

pub use control::SearchControl;
pub use distance::{CARDINAL_COST, DIAGONAL_COST, octile};
pub use error::PathError;
pub use node::{CellKind, Node, NodeObserver};
pub use pathfinder::Pathfinder;
