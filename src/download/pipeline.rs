//! Pipeline orchestration: listing pool → bounded task queue → download pool.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::api::{build_http_client, HttpSettings, RedditApi, API_BASE};
use crate::download::completion::{CompletionTracker, Tracked};
use crate::download::file::download_worker;
use crate::download::listing::listing_worker;
use crate::download::state::{RunStats, StatsSnapshot};
use crate::download::worker::WorkerContext;
use crate::error::{Error, Result};
use crate::fs::ensure_dir;
use crate::media::FilterSet;

/// Capacity of the task queue between the two pools.
pub const TASK_QUEUE_CAPACITY: usize = 1000;

/// How long workers get to wind down once the run is cancelled.
const TEARDOWN_GRACE: Duration = Duration::from_secs(2);

/// Deadline used when the configured timeout does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Instant at which a run started now with `timeout` must stop.
fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Number of workers per pool when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub download_root: PathBuf,
    pub filter: FilterSet,
    /// Workers in each of the two pools.
    pub workers: usize,
    /// End-to-end deadline for listings and downloads together.
    pub timeout: Duration,
    pub base_url: String,
    pub http: HttpSettings,
}

impl PipelineOptions {
    pub fn new(download_root: impl Into<PathBuf>, filter: FilterSet, timeout: Duration) -> Self {
        Self {
            download_root: download_root.into(),
            filter,
            workers: default_workers(),
            timeout,
            base_url: API_BASE.to_string(),
            http: HttpSettings::default(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Download every matching file linked from `subreddits`.
pub async fn run_pipeline(subreddits: &[String], options: PipelineOptions) -> Result<StatsSnapshot> {
    run_pipeline_with_cancel(subreddits, options, CancellationToken::new()).await
}

/// Like [`run_pipeline`], but also stops when `stop` is cancelled.
///
/// Returns [`Error::Timeout`] when the deadline elapses and
/// [`Error::Cancelled`] on an external stop. Individual listing or download
/// failures are logged and counted, never returned.
pub async fn run_pipeline_with_cancel(
    subreddits: &[String],
    options: PipelineOptions,
    stop: CancellationToken,
) -> Result<StatsSnapshot> {
    if subreddits.is_empty() {
        return Err(Error::NoCommunities);
    }

    let deadline = deadline_after(options.timeout);
    let workers = options.workers.max(1);

    ensure_dir(&options.download_root).await?;

    let client = build_http_client(&options.http)?;
    let cancel = stop.child_token();
    let tracker = CompletionTracker::new();
    let stats = Arc::new(RunStats::new());

    let ctx = WorkerContext {
        api: RedditApi::with_base_url(client, options.base_url.clone()),
        filter: Arc::new(options.filter),
        download_root: Arc::new(options.download_root),
        tracker: tracker.clone(),
        stats: stats.clone(),
        cancel: cancel.clone(),
    };

    let (subreddit_tx, subreddit_rx) = mpsc::channel(subreddits.len());
    let (task_tx, task_rx) = mpsc::channel(TASK_QUEUE_CAPACITY);
    let subreddit_rx = Arc::new(Mutex::new(subreddit_rx));
    let task_rx = Arc::new(Mutex::new(task_rx));

    // Register every subreddit before any worker can finish one.
    let guards: Vec<_> = subreddits.iter().map(|_| tracker.register()).collect();

    tracing::info!(
        subreddits = subreddits.len(),
        workers,
        "Starting {} listing and {} download workers",
        workers,
        workers
    );

    let mut pool = JoinSet::new();
    for id in 0..workers {
        pool.spawn(listing_worker(
            id,
            ctx.clone(),
            subreddit_rx.clone(),
            task_tx.clone(),
        ));
        pool.spawn(download_worker(id, ctx.clone(), task_rx.clone()));
    }
    // Only workers hold queue handles from here on, so the task queue closes
    // once the last listing worker exits.
    drop(task_tx);
    drop(subreddit_rx);
    drop(task_rx);

    for (subreddit, guard) in subreddits.iter().zip(guards) {
        if subreddit_tx
            .send(Tracked::new(subreddit.clone(), guard))
            .await
            .is_err()
        {
            break;
        }
    }
    drop(subreddit_tx);

    let outcome = tokio::select! {
        _ = tracker.wait() => Ok(()),
        _ = tokio::time::sleep_until(deadline) => Err(Error::Timeout(options.timeout)),
        _ = stop.cancelled() => Err(Error::Cancelled),
    };

    if outcome.is_err() {
        tracing::warn!(pending = tracker.pending(), "Stopping run before all work finished");
    }
    cancel.cancel();
    shutdown(&mut pool).await;

    outcome.map(|()| stats.snapshot(tracker.signalled()))
}

async fn shutdown(pool: &mut JoinSet<()>) {
    let drained = tokio::time::timeout(TEARDOWN_GRACE, async {
        while let Some(res) = pool.join_next().await {
            if let Err(e) = res {
                tracing::error!("Worker task failed: {}", e);
            }
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!("Workers did not stop within {:?}, aborting", TEARDOWN_GRACE);
        pool.abort_all();
    }
}
