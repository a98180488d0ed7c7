//! Octile distance in the scaled integer cost model.

use stargrid_core::Point;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: i32 = 10;

/// Cost of a diagonal step (√2 ≈ 1.4, scaled by 10 for integer math).
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance between two points:
/// `14 * min(dx, dy) + 10 * (max(dx, dy) - min(dx, dy))`.
///
/// Serves both as the A* heuristic and as the exact cost of a move between
/// adjacent cells. The diagonal term is defined regardless of the active
/// connectivity mode; with diagonal movement disabled it is simply never
/// reached for adjacent pairs.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + CARDINAL_COST * (hi - lo)
}
