//! Run statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated concurrently by the worker pools.
#[derive(Debug, Default)]
pub struct RunStats {
    subreddits_processed: AtomicU64,
    subreddits_failed: AtomicU64,
    tasks_queued: AtomicU64,
    files_downloaded: AtomicU64,
    files_skipped: AtomicU64,
    files_failed: AtomicU64,
    bytes_written: AtomicU64,
}

/// Point-in-time copy of [`RunStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub subreddits_processed: u64,
    pub subreddits_failed: u64,
    pub tasks_queued: u64,
    pub files_downloaded: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub bytes_written: u64,
    /// Terminal signals seen by the completion tracker.
    pub completions: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listing that was fetched and filtered.
    pub fn subreddit_processed(&self) {
        self.subreddits_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a listing that could not be fetched or decoded.
    pub fn subreddit_failed(&self) {
        self.subreddits_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn task_queued(&self) {
        self.tasks_queued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed download of `bytes` bytes.
    pub fn file_downloaded(&self, bytes: u64) {
        self.files_downloaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn file_skipped(&self) {
        self.files_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the counters, attaching the tracker's completion count.
    pub fn snapshot(&self, completions: u64) -> StatsSnapshot {
        StatsSnapshot {
            subreddits_processed: self.subreddits_processed.load(Ordering::Relaxed),
            subreddits_failed: self.subreddits_failed.load(Ordering::Relaxed),
            tasks_queued: self.tasks_queued.load(Ordering::Relaxed),
            files_downloaded: self.files_downloaded.load(Ordering::Relaxed),
            files_skipped: self.files_skipped.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            completions,
        }
    }
}

impl StatsSnapshot {
    /// Files that reached a terminal state without failing.
    pub fn total_ok(&self) -> u64 {
        self.files_downloaded + self.files_skipped
    }
}
