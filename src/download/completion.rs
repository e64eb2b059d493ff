//! Completion tracking for pipeline work units.
//!
//! Every community and every download task registered with the tracker holds
//! a [`CompletionGuard`]. Dropping the guard is the unit's one terminal
//! signal, whether it finished, failed, or was abandoned inside a queue that
//! got dropped on cancellation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug)]
struct Inner {
    pending: watch::Sender<usize>,
    signalled: AtomicU64,
}

/// Counting join primitive shared by the orchestrator and both worker pools.
#[derive(Debug, Clone)]
pub struct CompletionTracker {
    inner: Arc<Inner>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                pending,
                signalled: AtomicU64::new(0),
            }),
        }
    }

    /// Register one pending unit.
    pub fn register(&self) -> CompletionGuard {
        self.inner.pending.send_modify(|n| *n += 1);
        CompletionGuard {
            tracker: self.clone(),
        }
    }

    /// Number of units registered but not yet signalled.
    pub fn pending(&self) -> usize {
        *self.inner.pending.borrow()
    }

    /// Total terminal signals received so far.
    pub fn signalled(&self) -> u64 {
        self.inner.signalled.load(Ordering::Acquire)
    }

    /// Wait until no registered unit is pending.
    ///
    /// Returns immediately if nothing is pending. Callers must register the
    /// initial units before waiting.
    pub async fn wait(&self) {
        let mut rx = self.inner.pending.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    fn complete(&self) {
        self.inner.signalled.fetch_add(1, Ordering::AcqRel);
        self.inner.pending.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// One registered unit of work; signals completion when dropped.
#[derive(Debug)]
#[must_use = "dropping the guard immediately marks the unit as complete"]
pub struct CompletionGuard {
    tracker: CompletionTracker,
}

impl CompletionGuard {
    /// Mark the unit complete now.
    pub fn done(self) {}
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.tracker.complete();
    }
}

/// A queued item together with the guard of its work unit.
#[derive(Debug)]
pub struct Tracked<T> {
    pub item: T,
    guard: CompletionGuard,
}

impl<T> Tracked<T> {
    pub fn new(item: T, guard: CompletionGuard) -> Self {
        Self { item, guard }
    }

    pub fn into_parts(self) -> (T, CompletionGuard) {
        (self.item, self.guard)
    }
}
