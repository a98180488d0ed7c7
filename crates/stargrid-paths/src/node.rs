//! The per-cell [`Node`] model and its change-notification hook.

use std::fmt;
use std::sync::Arc;

use stargrid_core::Point;

/// Classification of a grid cell during search.
///
/// `Start` and `End` are sticky against the engine's `Open`/`Closed`
/// bookkeeping (see [`Node`]), but may be replaced by explicit
/// re-designation through the pathfinder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Not yet touched by the search.
    #[default]
    Unevaluated,
    /// Discovered, waiting in the open frontier.
    Open,
    /// Finalized; its minimal cost is known.
    Closed,
    /// The search origin.
    Start,
    /// The search target.
    End,
    /// Impassable.
    Barrier,
    /// Part of the reconstructed path.
    Path,
}

/// Callback invoked with a node whenever its classification or any cost
/// component changes. At most one observer per node; registering a new one
/// replaces the old. `Send + Sync` so a grid with observers can still move
/// to a worker thread; the callback itself always runs synchronously on
/// whichever thread drives the mutation.
pub type NodeObserver = Arc<dyn Fn(&Node) + Send + Sync>;

/// One cell of the pathfinder's grid.
///
/// Costs are integers in the scaled octile model (cardinal step 10,
/// diagonal step 14). `f` is kept equal to `g + h` by the mutators; nothing
/// ever sets it directly. The parent is a coordinate back-reference into
/// the owning grid, used for path reconstruction.
pub struct Node {
    pos: Point,
    kind: CellKind,
    g: i32,
    h: i32,
    f: i32,
    parent: Option<Point>,
    observer: Option<NodeObserver>,
}

impl Node {
    /// Create an `Unevaluated` node at `pos` with zero costs.
    pub(crate) fn new(pos: Point) -> Self {
        Self {
            pos,
            kind: CellKind::default(),
            g: 0,
            h: 0,
            f: 0,
            parent: None,
            observer: None,
        }
    }

    /// Grid position.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Row coordinate.
    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    /// Column coordinate.
    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    /// Current classification.
    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Accumulated cost from the start node.
    #[inline]
    pub fn g_cost(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the end node.
    #[inline]
    pub fn h_cost(&self) -> i32 {
        self.h
    }

    /// Priority key: `g + h`.
    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.f
    }

    /// Predecessor on the best known path, if discovered.
    #[inline]
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }

    /// Register (or clear) the change observer for this node. Replaces any
    /// previously registered observer; registration itself does not notify.
    pub fn set_observer(&mut self, observer: Option<NodeObserver>) {
        self.observer = observer;
    }

    /// Set the g-cost. No-op (no notification, no `f` recomputation) when
    /// the value is unchanged.
    pub(crate) fn set_g_cost(&mut self, g: i32) {
        if g == self.g {
            return;
        }
        self.g = g;
        self.recompute_f();
    }

    /// Set the h-cost. No-op when the value is unchanged.
    pub(crate) fn set_h_cost(&mut self, h: i32) {
        if h == self.h {
            return;
        }
        self.h = h;
        self.recompute_f();
    }

    /// Set the classification and notify, unconditionally (unlike costs,
    /// classification changes always notify, even when unchanged).
    ///
    /// Rejected when the node is `Start` or `End` and the requested kind is
    /// `Open` or `Closed`: the two anchors must never be absorbed into the
    /// frontier bookkeeping.
    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        if matches!(self.kind, CellKind::Start | CellKind::End)
            && matches!(kind, CellKind::Open | CellKind::Closed)
        {
            return;
        }
        self.kind = kind;
        self.notify();
    }

    /// Set the parent back-reference. Does not notify.
    pub(crate) fn set_parent(&mut self, parent: Option<Point>) {
        self.parent = parent;
    }

    fn recompute_f(&mut self) {
        self.f = self.g + self.h;
        self.notify();
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(self);
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("pos", &self.pos)
            .field("kind", &self.kind)
            .field("g", &self.g)
            .field("h", &self.h)
            .field("f", &self.f)
            .field("parent", &self.parent)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counter() -> (Arc<AtomicU32>, NodeObserver) {
        let count = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&count);
        (count, Arc::new(move |_n: &Node| {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn f_cost_tracks_g_plus_h() {
        let mut node = Node::new(Point::new(1, 2));
        node.set_g_cost(30);
        node.set_h_cost(14);
        assert_eq!(node.f_cost(), 44);
        node.set_g_cost(20);
        assert_eq!(node.f_cost(), 34);
    }

    #[test]
    fn equal_cost_set_is_suppressed() {
        let mut node = Node::new(Point::ZERO);
        let (count, obs) = counter();
        node.set_observer(Some(obs));

        node.set_g_cost(10);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        node.set_g_cost(10); // unchanged, must not notify
        assert_eq!(count.load(Ordering::SeqCst), 1);
        node.set_h_cost(0); // already the default
        assert_eq!(count.load(Ordering::SeqCst), 1);
        node.set_h_cost(14);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn kind_change_always_notifies() {
        let mut node = Node::new(Point::ZERO);
        let (count, obs) = counter();
        node.set_observer(Some(obs));

        node.set_kind(CellKind::Open);
        node.set_kind(CellKind::Open); // same kind still notifies
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn anchors_resist_frontier_kinds() {
        let mut node = Node::new(Point::ZERO);
        node.set_kind(CellKind::Start);
        node.set_kind(CellKind::Open);
        assert_eq!(node.kind(), CellKind::Start);
        node.set_kind(CellKind::Closed);
        assert_eq!(node.kind(), CellKind::Start);

        // Explicit re-designation is still allowed.
        node.set_kind(CellKind::Barrier);
        assert_eq!(node.kind(), CellKind::Barrier);

        let mut end = Node::new(Point::ZERO);
        end.set_kind(CellKind::End);
        end.set_kind(CellKind::Closed);
        assert_eq!(end.kind(), CellKind::End);
        end.set_kind(CellKind::Unevaluated);
        assert_eq!(end.kind(), CellKind::Unevaluated);
    }

    #[test]
    fn observer_replacement_drops_the_old_one() {
        let mut node = Node::new(Point::ZERO);
        let (first, obs1) = counter();
        let (second, obs2) = counter();
        node.set_observer(Some(obs1));
        node.set_kind(CellKind::Barrier);
        node.set_observer(Some(obs2));
        node.set_kind(CellKind::Unevaluated);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        node.set_observer(None);
        node.set_kind(CellKind::Barrier);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
