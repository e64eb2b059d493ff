//! Reddit Image Downloader - CLI entry point.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use reddit_image_downloader::{
    cli::Args,
    config::{validate_config, Config},
    download::{run_pipeline_with_cancel, PipelineOptions},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_summary,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            if e.is_fatal() {
                ExitCode::from(exit_codes::CONFIG_ERROR as u8)
            } else {
                ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8)
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    fmt().with_env_filter(filter).with_target(false).init();

    if !args.quiet {
        print_banner();
    }

    // Load configuration
    tracing::info!("Reading config file at {}", args.config.display());
    let mut config = Config::load(&args.config)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let filter = config.filter_set();
    if !args.quiet {
        print_config_summary(&config.subreddits, &config.download_path, &filter.sorted());
    }

    let mut options = PipelineOptions::new(config.download_path.clone(), filter, args.timeout());
    if let Some(workers) = args.workers {
        options = options.with_workers(workers);
    }

    // Ctrl-C stops the run the same way the deadline does.
    let stop = CancellationToken::new();
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, stopping");
                stop.cancel();
            }
        });
    }

    let started = Instant::now();
    match run_pipeline_with_cancel(&config.subreddits, options, stop).await {
        Ok(stats) => {
            if !args.quiet {
                print_run_summary(&stats, started.elapsed());
            }
            print_success("Finished");
            Ok(())
        }
        // Partial runs are not fatal; whatever was downloaded stays on disk.
        Err(e @ (Error::Timeout(_) | Error::Cancelled)) => {
            print_warning(&format!("{}", e));
            print_info("Files downloaded so far were kept");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
