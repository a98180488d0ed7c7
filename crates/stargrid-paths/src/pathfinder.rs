//! The [`Pathfinder`]: grid ownership, cell designation, and connectivity.

use stargrid_core::Point;

use crate::node::{CellKind, Node, NodeObserver};

/// A fixed-size 2D grid of [`Node`]s on which A* searches run.
///
/// Coordinates are 0-based: `x` indexes rows (`0..rows`), `y` indexes
/// columns (`0..columns`), so a 10×10 grid has no cell (10, 10). Nodes are
/// stored row-major in a flat vector and live for the pathfinder's
/// lifetime; searches and edits only touch their mutable state.
///
/// The pathfinder is single-threaded: the grid must not be edited while a
/// search is in progress on another thread. Cross-thread coordination goes
/// through [`SearchControl`](crate::SearchControl) only.
pub struct Pathfinder {
    rows: i32,
    columns: i32,
    diagonal: bool,
    pub(crate) nodes: Vec<Node>,
    pub(crate) start: Option<Point>,
    pub(crate) end: Option<Point>,
    // Frontier membership, reset at the start of each search.
    pub(crate) in_open: Vec<bool>,
    pub(crate) in_closed: Vec<bool>,
    // Reusable neighbor scratch buffer.
    pub(crate) nbuf: Vec<Point>,
}

impl Pathfinder {
    /// Create a pathfinder with a `rows × columns` grid of `Unevaluated`
    /// nodes. `diagonal` selects 8-connectivity; it can be changed later
    /// with [`set_diagonal`](Self::set_diagonal).
    ///
    /// Dimensions are clamped to be non-negative.
    pub fn new(rows: i32, columns: i32, diagonal: bool) -> Self {
        let rows = rows.max(0);
        let columns = columns.max(0);
        let len = (rows as usize) * (columns as usize);
        let mut nodes = Vec::with_capacity(len);
        for x in 0..rows {
            for y in 0..columns {
                nodes.push(Node::new(Point::new(x, y)));
            }
        }
        Self {
            rows,
            columns,
            diagonal,
            nodes,
            start: None,
            end: None,
            in_open: vec![false; len],
            in_closed: vec![false; len],
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Number of rows (extent of `x`).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns (extent of `y`).
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Whether diagonal movement is enabled for future searches.
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.diagonal
    }

    /// Enable or disable diagonal movement. Affects future searches only.
    pub fn set_diagonal(&mut self, diagonal: bool) {
        self.diagonal = diagonal;
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.rows && p.y >= 0 && p.y < self.columns
    }

    /// Flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.x as usize) * (self.columns as usize) + p.y as usize)
    }

    /// The node at `p`, or `None` when out of bounds.
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.idx(p).map(|i| &self.nodes[i])
    }

    /// Iterate over all nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Currently designated start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Currently designated end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Register (or clear) the change observer of the node at `p`.
    /// No-op when `p` is out of bounds.
    pub fn set_observer(&mut self, p: Point, observer: Option<NodeObserver>) {
        if let Some(i) = self.idx(p) {
            self.nodes[i].set_observer(observer);
        }
    }

    /// Designate the cell at `p`, silently ignoring out-of-bounds
    /// coordinates.
    ///
    /// Assigning `Start` or `End` first demotes any previous holder of
    /// that role to `Unevaluated` (there is at most one of each), and
    /// takes the role away from the other anchor if `p` currently holds
    /// it. Reclassifying the current start or end cell to anything else
    /// clears the corresponding role.
    pub fn set_cell(&mut self, p: Point, kind: CellKind) {
        let Some(i) = self.idx(p) else {
            return;
        };
        match kind {
            CellKind::Start => {
                if let Some(prev) = self.start
                    && prev != p
                    && let Some(pi) = self.idx(prev)
                {
                    self.nodes[pi].set_kind(CellKind::Unevaluated);
                }
                if self.end == Some(p) {
                    self.end = None;
                }
                self.start = Some(p);
            }
            CellKind::End => {
                if let Some(prev) = self.end
                    && prev != p
                    && let Some(pi) = self.idx(prev)
                {
                    self.nodes[pi].set_kind(CellKind::Unevaluated);
                }
                if self.start == Some(p) {
                    self.start = None;
                }
                self.end = Some(p);
            }
            _ => {
                if self.start == Some(p) {
                    self.start = None;
                }
                if self.end == Some(p) {
                    self.end = None;
                }
            }
        }
        self.nodes[i].set_kind(kind);
    }

    /// Designate `(x, y)` as the start cell. See [`set_cell`](Self::set_cell).
    pub fn set_start(&mut self, x: i32, y: i32) {
        self.set_cell(Point::new(x, y), CellKind::Start);
    }

    /// Designate `(x, y)` as the end cell. See [`set_cell`](Self::set_cell).
    pub fn set_end(&mut self, x: i32, y: i32) {
        self.set_cell(Point::new(x, y), CellKind::End);
    }

    /// Mark `(x, y)` impassable. See [`set_cell`](Self::set_cell).
    pub fn set_barrier(&mut self, x: i32, y: i32) {
        self.set_cell(Point::new(x, y), CellKind::Barrier);
    }

    /// Reclassify `(x, y)` back to `Unevaluated`.
    pub fn clear_cell(&mut self, x: i32, y: i32) {
        self.set_cell(Point::new(x, y), CellKind::Unevaluated);
    }

    /// Reset the grid keeping its structure: `Start`, `End` and `Barrier`
    /// designations stay where they are, every other cell returns to
    /// `Unevaluated`, and all cost/parent state from previous searches is
    /// dropped. Registered observers are kept and notified of the
    /// resulting classifications.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            match node.kind() {
                kind @ (CellKind::Start | CellKind::End | CellKind::Barrier) => {
                    node.set_kind(kind);
                }
                _ => node.set_kind(CellKind::Unevaluated),
            }
            node.set_g_cost(0);
            node.set_h_cost(0);
            node.set_parent(None);
        }
        self.in_open.fill(false);
        self.in_closed.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_edits_are_ignored() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_start(-1, 0);
        pf.set_end(8, 3);
        pf.set_barrier(4, 99);
        assert_eq!(pf.start(), None);
        assert_eq!(pf.end(), None);
        assert!(pf.nodes().all(|n| n.kind() == CellKind::Unevaluated));
    }

    #[test]
    fn contains_matches_dimensions() {
        let pf = Pathfinder::new(3, 5, false);
        assert!(pf.contains(Point::new(0, 0)));
        assert!(pf.contains(Point::new(2, 4)));
        assert!(!pf.contains(Point::new(3, 0)));
        assert!(!pf.contains(Point::new(0, 5)));
        assert!(!pf.contains(Point::new(-1, 2)));
    }

    #[test]
    fn redesignating_start_demotes_the_old_one() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_start(1, 1);
        pf.set_start(2, 2);
        assert_eq!(pf.start(), Some(Point::new(2, 2)));
        assert_eq!(
            pf.node(Point::new(1, 1)).unwrap().kind(),
            CellKind::Unevaluated
        );
        assert_eq!(pf.node(Point::new(2, 2)).unwrap().kind(), CellKind::Start);
    }

    #[test]
    fn redesignating_end_demotes_the_old_one() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_end(5, 0);
        pf.set_end(5, 1);
        assert_eq!(pf.end(), Some(Point::new(5, 1)));
        assert_eq!(
            pf.node(Point::new(5, 0)).unwrap().kind(),
            CellKind::Unevaluated
        );
    }

    #[test]
    fn reclassifying_an_anchor_clears_its_role() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_start(3, 3);
        pf.set_barrier(3, 3);
        assert_eq!(pf.start(), None);
        assert_eq!(pf.node(Point::new(3, 3)).unwrap().kind(), CellKind::Barrier);

        pf.set_end(4, 4);
        pf.clear_cell(4, 4);
        assert_eq!(pf.end(), None);
    }

    #[test]
    fn start_onto_the_end_cell_steals_the_role() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_end(6, 6);
        pf.set_start(6, 6);
        assert_eq!(pf.start(), Some(Point::new(6, 6)));
        assert_eq!(pf.end(), None);
        assert_eq!(pf.node(Point::new(6, 6)).unwrap().kind(), CellKind::Start);
    }

    #[test]
    fn redesignating_the_same_start_is_stable() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_start(2, 2);
        pf.set_start(2, 2);
        assert_eq!(pf.start(), Some(Point::new(2, 2)));
        assert_eq!(pf.node(Point::new(2, 2)).unwrap().kind(), CellKind::Start);
    }

    #[test]
    fn reset_keeps_structure_and_drops_search_state() {
        let mut pf = Pathfinder::new(8, 8, true);
        pf.set_start(0, 0);
        pf.set_end(7, 7);
        pf.set_barrier(3, 3);
        let path = pf.find_path().unwrap();
        assert!(path.is_some());

        pf.reset();
        assert_eq!(pf.start(), Some(Point::new(0, 0)));
        assert_eq!(pf.end(), Some(Point::new(7, 7)));
        assert_eq!(pf.node(Point::new(3, 3)).unwrap().kind(), CellKind::Barrier);
        for node in pf.nodes() {
            assert!(!matches!(
                node.kind(),
                CellKind::Open | CellKind::Closed | CellKind::Path
            ));
            assert_eq!(node.g_cost(), 0);
            assert_eq!(node.h_cost(), 0);
            assert_eq!(node.f_cost(), 0);
            assert_eq!(node.parent(), None);
        }
    }
}
