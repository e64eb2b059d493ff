//! Statistics reporting.

use std::time::Duration;

use console::style;

use crate::download::StatsSnapshot;

/// Print the totals of a finished run.
pub fn print_run_summary(stats: &StatsSnapshot, elapsed: Duration) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Subreddits: {}", stats.subreddits_processed);
    if stats.subreddits_failed > 0 {
        println!("  Failed:     {}", style(stats.subreddits_failed).red());
    }
    println!("  Matched:    {}", stats.tasks_queued);
    println!("  Downloaded: {}", style(stats.files_downloaded).green());
    println!("  Skipped:    {} (already present)", style(stats.files_skipped).yellow());
    if stats.files_failed > 0 {
        println!("  Errors:     {}", style(stats.files_failed).red());
    }
    println!("  Written:    {}", format_bytes(stats.bytes_written));
    println!("  Elapsed:    {:.1}s", elapsed.as_secs_f64());
    println!("{}", style("═".repeat(50)).dim());
}

/// Human readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
