//! The A* main loop and path reconstruction.

use std::collections::BinaryHeap;

use stargrid_core::Point;

use crate::control::SearchControl;
use crate::distance::octile;
use crate::error::PathError;
use crate::node::CellKind;
use crate::pathfinder::Pathfinder;

/// Heap entry referencing a node by flat index, ordered by `f` with FIFO
/// tie-breaking via the insertion sequence number.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenRef {
    f: i32,
    seq: u64,
    idx: usize,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the lowest f first; among
        // equal f, the earliest-inserted entry wins (stable FIFO).
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Pathfinder {
    /// Run A* from the designated start to the designated end.
    ///
    /// Returns `Ok(Some(path))` with the full start→end point sequence on
    /// success, `Ok(None)` when the frontier is exhausted without reaching
    /// the end, and `Err` when start or end is undesignated. Intermediate
    /// path cells are reclassified to `Path`; start and end keep their
    /// anchor classification.
    pub fn find_path(&mut self) -> Result<Option<Vec<Point>>, PathError> {
        self.search(None)
    }

    /// Like [`find_path`](Self::find_path), but polls `control` once per
    /// popped node: blocks while paused, and returns
    /// [`PathError::Cancelled`] when cancelled.
    pub fn find_path_with(
        &mut self,
        control: &SearchControl,
    ) -> Result<Option<Vec<Point>>, PathError> {
        self.search(Some(control))
    }

    fn search(&mut self, control: Option<&SearchControl>) -> Result<Option<Vec<Point>>, PathError> {
        let start = self.start().ok_or(PathError::StartUnset)?;
        let end = self.end().ok_or(PathError::EndUnset)?;
        // Designation guarantees both anchors are in bounds.
        let (Some(start_idx), Some(end_idx)) = (self.idx(start), self.idx(end)) else {
            return Ok(None);
        };

        log::debug!(
            "A* {start} -> {end} on {}x{} grid, diagonal={}",
            self.rows(),
            self.columns(),
            self.is_diagonal()
        );

        // Fresh frontier for this run.
        self.in_open.fill(false);
        self.in_closed.fill(false);
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        let mut seq: u64 = 0;

        open.push(OpenRef {
            f: self.nodes[start_idx].f_cost(),
            seq,
            idx: start_idx,
        });
        seq += 1;
        self.in_open[start_idx] = true;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut popped: u64 = 0;

        let found = loop {
            if let Some(ctl) = control
                && !ctl.checkpoint()
            {
                self.nbuf = nbuf;
                log::debug!("search cancelled after {popped} expansions");
                return Err(PathError::Cancelled);
            }

            let Some(current) = open.pop() else {
                break false;
            };
            let ci = current.idx;

            // Stale heap entry, superseded by a cheaper relaxation.
            if self.in_closed[ci] {
                continue;
            }

            self.in_open[ci] = false;
            self.in_closed[ci] = true;
            popped += 1;

            if ci == end_idx {
                break true;
            }

            self.nodes[ci].set_kind(CellKind::Closed);

            let cp = self.nodes[ci].pos();
            let current_g = self.nodes[ci].g_cost();
            log::trace!("expanding {cp} g={current_g} f={}", current.f);

            nbuf.clear();
            if self.is_diagonal() {
                nbuf.extend(cp.neighbors_8());
            } else {
                nbuf.extend(cp.neighbors_4());
            }

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.nodes[ni].kind() == CellKind::Barrier || self.in_closed[ni] {
                    continue;
                }

                let tentative_g = current_g + octile(cp, np);

                // Relax when the new route is cheaper, or whenever the
                // neighbor is not currently enqueued (its default g of 0 is
                // a sentinel, not a real cost). Closed nodes were filtered
                // above, so this never reopens a finalized node.
                if tentative_g < self.nodes[ni].g_cost() || !self.in_open[ni] {
                    self.nodes[ni].set_g_cost(tentative_g);
                    self.nodes[ni].set_h_cost(octile(np, end));
                    self.nodes[ni].set_parent(Some(cp));

                    if !self.in_open[ni] {
                        self.in_open[ni] = true;
                        self.nodes[ni].set_kind(CellKind::Open);
                    }
                    // A cost decrease of an already-open node pushes a
                    // fresh entry; the stale one is skipped on pop.
                    open.push(OpenRef {
                        f: self.nodes[ni].f_cost(),
                        seq,
                        idx: ni,
                    });
                    seq += 1;
                }
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::debug!("no path after {popped} expansions");
            return Ok(None);
        }

        let path = self.retrace(start, end);
        log::debug!("path found: {} cells after {popped} expansions", path.len());
        Ok(Some(path))
    }

    /// Walk parent links backward from the end, reverse into start→end
    /// order, and reclassify the intermediate cells to `Path`.
    fn retrace(&mut self, start: Point, end: Point) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(end);
        while let Some(p) = cur {
            path.push(p);
            if p == start {
                break;
            }
            cur = self.idx(p).and_then(|i| self.nodes[i].parent());
        }
        path.reverse();

        for &p in &path {
            if p == start || p == end {
                continue;
            }
            if let Some(i) = self.idx(p) {
                self.nodes[i].set_kind(CellKind::Path);
            }
        }
        path
    }
}
