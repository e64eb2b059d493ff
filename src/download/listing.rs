//! Listing worker: fetch subreddit listings and emit matching download tasks.

use tokio::sync::mpsc;

use crate::api::Listing;
use crate::download::completion::Tracked;
use crate::download::task::DownloadTask;
use crate::download::worker::{next_unit, SharedReceiver, WorkerContext};
use crate::error::Error;
use crate::media::{decode_entities, extension, filename_from_url, FilterSet};

/// Build the download tasks for every listing item whose extension is enabled.
pub fn match_tasks(subreddit: &str, listing: &Listing, filter: &FilterSet) -> Vec<DownloadTask> {
    listing
        .urls()
        .filter_map(|raw| {
            let url = decode_entities(raw);
            let filename = filename_from_url(&url);
            if filename.is_empty() || !filter.contains(extension(&filename)) {
                return None;
            }
            Some(DownloadTask::new(filename, subreddit, url))
        })
        .collect()
}

/// Process subreddits until the queue is closed or the run is cancelled.
pub async fn listing_worker(
    id: usize,
    ctx: WorkerContext,
    subreddits: SharedReceiver<String>,
    tasks: mpsc::Sender<Tracked<DownloadTask>>,
) {
    tracing::debug!("Listing worker {} started", id);

    while let Some(unit) = next_unit(&subreddits, &ctx.cancel).await {
        let (subreddit, guard) = unit.into_parts();
        process_subreddit(&ctx, &subreddit, &tasks).await;
        guard.done();
    }

    tracing::debug!("Listing worker {} stopped", id);
}

async fn process_subreddit(
    ctx: &WorkerContext,
    subreddit: &str,
    tasks: &mpsc::Sender<Tracked<DownloadTask>>,
) {
    tracing::info!(subreddit, "Parsing {}", subreddit);

    let listing = match ctx.api.get_listing(subreddit, &ctx.cancel).await {
        Ok(listing) => listing,
        Err(Error::Cancelled) => {
            tracing::debug!(subreddit, "Listing fetch cancelled");
            return;
        }
        Err(e) => {
            tracing::warn!(subreddit, "Error fetching {}: {}", subreddit, e);
            ctx.stats.subreddit_failed();
            return;
        }
    };

    let matched = match_tasks(subreddit, &listing, &ctx.filter);
    tracing::debug!(
        subreddit,
        items = listing.data.children.len(),
        matched = matched.len(),
        "Filtered listing"
    );

    for task in matched {
        let unit = Tracked::new(task, ctx.tracker.register());

        // Dropping an unsent unit here releases its guard.
        let sent = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => false,
            res = tasks.send(unit) => res.is_ok(),
        };
        if !sent {
            tracing::debug!(subreddit, "Task queue closed, dropping remaining items");
            break;
        }
        ctx.stats.task_queued();
    }

    ctx.stats.subreddit_processed();
}
