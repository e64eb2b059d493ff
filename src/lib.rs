//! Reddit Image Downloader - download media linked from subreddit listings.
//!
//! # Features
//!
//! - Fetch the JSON listing of each configured subreddit
//! - Keep posts whose linked file has an enabled extension
//! - Download matches into `<download path>/<subreddit>/<filename>`
//! - Skip files that already exist
//! - Listing and downloading run as two concurrent worker pools under one deadline
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use reddit_image_downloader::{run_pipeline, validate_config, Config, PipelineOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     validate_config(&config)?;
//!
//!     let options = PipelineOptions::new(
//!         config.download_path.clone(),
//!         config.filter_set(),
//!         Duration::from_secs(300),
//!     );
//!     let stats = run_pipeline(&config.subreddits, options).await?;
//!     println!("{} files downloaded", stats.files_downloaded);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::RedditApi;
pub use config::{validate_config, Config};
pub use download::{
    run_pipeline, run_pipeline_with_cancel, DownloadTask, PipelineOptions, StatsSnapshot,
};
pub use error::{Error, Result};
pub use media::FilterSet;
