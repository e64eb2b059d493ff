//! State shared by the listing and download worker pools.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::api::RedditApi;
use crate::download::completion::{CompletionTracker, Tracked};
use crate::download::state::RunStats;
use crate::media::FilterSet;

/// Receiving end of a work queue, drained by every worker of one pool.
pub type SharedReceiver<T> = Arc<Mutex<mpsc::Receiver<Tracked<T>>>>;

/// Everything a worker needs for the duration of a run.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// Listing client; also owns the shared HTTP client used for downloads.
    pub api: RedditApi,
    pub filter: Arc<FilterSet>,
    pub download_root: Arc<PathBuf>,
    pub tracker: CompletionTracker,
    pub stats: Arc<RunStats>,
    /// Run-wide deadline / stop signal.
    pub cancel: CancellationToken,
}

/// Pull the next unit from a shared queue.
///
/// Returns `None` once the queue is closed and drained, or as soon as the run
/// is cancelled. Cancellation is checked first, so no unit is handed out
/// after the deadline.
pub async fn next_unit<T>(
    queue: &SharedReceiver<T>,
    cancel: &CancellationToken,
) -> Option<Tracked<T>> {
    if cancel.is_cancelled() {
        return None;
    }

    let mut rx = tokio::select! {
        biased;
        _ = cancel.cancelled() => return None,
        rx = queue.lock() => rx,
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        unit = rx.recv() => unit,
    }
}
