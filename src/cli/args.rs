//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// Reddit image downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "reddit-image-downloader",
    version,
    about = "Download images and other media linked from subreddits",
    long_about = "Fetches the current listing of each configured subreddit and downloads every \
                  linked file whose extension is enabled, one folder per subreddit.\n\n\
                  Files that already exist are skipped."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Timeout in seconds for the entire operation.
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// Workers per pool (defaults to the number of CPUs).
    #[arg(short, long, env = "RID_WORKERS")]
    pub workers: Option<usize>,

    /// Override the download directory from the configuration file.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Overall deadline for the run.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Log level used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.download_directory {
            config.download_path = dir.clone();
        }
    }
}
