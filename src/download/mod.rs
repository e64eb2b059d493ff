//! Download module: the two-stage listing/download pipeline.
//!
//! This module provides:
//! - Completion tracking for registered work units
//! - The listing worker pool
//! - The download worker pool and streaming file download
//! - The orchestrator tying both pools to one deadline
//! - Run statistics

pub mod completion;
pub mod file;
pub mod listing;
pub mod pipeline;
pub mod state;
pub mod task;
pub mod worker;

pub use completion::{CompletionGuard, CompletionTracker, Tracked};
pub use file::{download_file, download_worker};
pub use listing::{listing_worker, match_tasks};
pub use pipeline::{
    default_workers, run_pipeline, run_pipeline_with_cancel, PipelineOptions, TASK_QUEUE_CAPACITY,
};
pub use state::{RunStats, StatsSnapshot};
pub use task::{DownloadOutcome, DownloadTask};
pub use worker::{next_unit, SharedReceiver, WorkerContext};
