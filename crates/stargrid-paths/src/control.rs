//! Cooperative pause / cancel handle for an in-progress search.
//!
//! The engine polls [`SearchControl::checkpoint`] once per popped node, at
//! the top of the main loop where no partial mutation is pending. Pausing
//! blocks the searching thread on a condvar at that boundary; cancelling
//! makes the search return [`PathError::Cancelled`](crate::PathError).
//! Suspending the searching thread from outside is never required.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct State {
    paused: bool,
    cancelled: bool,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    cond: Condvar,
}

/// Cloneable, thread-safe control handle shared with a running search.
///
/// All clones refer to the same pause/cancel state. The handle carries no
/// grid data, so it is the only part of the engine that is safe to touch
/// from another thread while a search runs.
#[derive(Clone, Default)]
pub struct SearchControl {
    inner: Arc<Inner>,
}

impl SearchControl {
    /// Create a fresh handle, neither paused nor cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search to block at its next checkpoint.
    pub fn pause(&self) {
        self.lock().paused = true;
    }

    /// Let a paused search continue.
    pub fn resume(&self) {
        self.lock().paused = false;
        self.inner.cond.notify_all();
    }

    /// Ask the search to stop at its next checkpoint. Also wakes a paused
    /// search so it can observe the cancellation.
    pub fn cancel(&self) {
        self.lock().cancelled = true;
        self.inner.cond.notify_all();
    }

    /// Whether the handle is currently paused.
    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Whether the handle has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Block while paused; report whether the search should keep going.
    pub(crate) fn checkpoint(&self) -> bool {
        let mut state = self.lock();
        while state.paused && !state.cancelled {
            state = self
                .inner
                .cond
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        !state.cancelled
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fresh_handle_passes_checkpoint() {
        let ctl = SearchControl::new();
        assert!(!ctl.is_paused());
        assert!(!ctl.is_cancelled());
        assert!(ctl.checkpoint());
    }

    #[test]
    fn cancel_fails_checkpoint() {
        let ctl = SearchControl::new();
        ctl.cancel();
        assert!(!ctl.checkpoint());
    }

    #[test]
    fn checkpoint_blocks_until_resumed() {
        let ctl = SearchControl::new();
        ctl.pause();
        let remote = ctl.clone();
        let waker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.resume();
        });
        // Blocks until the other thread resumes, then reports "keep going".
        assert!(ctl.checkpoint());
        waker.join().unwrap();
    }

    #[test]
    fn cancel_wakes_a_paused_search() {
        let ctl = SearchControl::new();
        ctl.pause();
        let remote = ctl.clone();
        let waker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        assert!(!ctl.checkpoint());
        waker.join().unwrap();
    }
}
