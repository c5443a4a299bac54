//! Ready/not-ready flag guarding query access to the index.
//!
//! The flag is written with `Release` and read with `Acquire`. The build
//! engine joins every worker before calling [`IndexStateGuard::mark_ready`],
//! so a reader that sees [`IndexState::Ready`] also sees every posting the
//! build wrote.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Whether a completed index is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    NotReady,
    Ready,
}

/// Synchronized holder of the [`IndexState`].
#[derive(Debug, Default)]
pub struct IndexStateGuard {
    ready: AtomicBool,
}

impl IndexStateGuard {
    /// Create a guard in the `NotReady` state.
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    /// Whether the index can be queried.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Current state.
    pub fn state(&self) -> IndexState {
        if self.is_ready() {
            IndexState::Ready
        } else {
            IndexState::NotReady
        }
    }

    /// Transition to `Ready`.
    ///
    /// Returns `true` if this call performed the transition and `false` if
    /// the flag was already set.
    pub fn mark_ready(&self) -> bool {
        self.ready
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Go back to `NotReady` ahead of a rebuild.
    pub fn reset(&self) {
        self.ready.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_not_ready() {
        let guard = IndexStateGuard::new();
        assert!(!guard.is_ready());
        assert_eq!(guard.state(), IndexState::NotReady);
    }

    #[test]
    fn test_mark_ready_is_idempotent() {
        let guard = IndexStateGuard::new();
        assert!(guard.mark_ready());
        assert!(!guard.mark_ready());
        assert_eq!(guard.state(), IndexState::Ready);

        guard.reset();
        assert!(!guard.is_ready());
        assert!(guard.mark_ready());
    }

    #[test]
    fn test_concurrent_mark_ready_transitions_once() {
        let guard = Arc::new(IndexStateGuard::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                thread::spawn(move || guard.mark_ready())
            })
            .collect();

        let transitions = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(transitions, 1);
        assert!(guard.is_ready());
    }
}
