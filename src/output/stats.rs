//! Statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::download::{ProfileReport, RunReport};

/// Print statistics for a single profile.
pub fn print_profile_report(report: &ProfileReport) {
    println!();
    println!("{}", style(format!("Statistics for {}:", report.nick)).bold());
    println!("  Photos:  {}", report.photo_count);
    println!("  Videos:  {}", report.video_count);
    println!("  Skipped: {} (already exist)", report.skipped.len());
    println!("  Total:   {} downloaded", report.total_downloaded());

    if report.has_failures() {
        println!("  Failed:  {}", style(report.failed.len()).red());
        for failed in &report.failed {
            println!("    {} {}: {}", style("✗").red(), failed.label, failed.reason);
        }
    }
}

/// Print totals across all profiles.
pub fn print_run_report(report: &RunReport) {
    for profile in &report.profiles {
        print_profile_report(profile);
    }

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Summary:").bold());
    println!("  Profiles processed: {}", report.profiles.len());
    println!(
        "Downloaded: {} photos, {} videos ({}), {} skipped",
        style(report.photo_count()).green(),
        style(report.video_count()).green(),
        HumanBytes(report.bytes_downloaded()),
        style(report.skipped_count()).yellow()
    );
    if report.has_failures() {
        println!("  Failed items: {}", style(report.failed_count()).red());
    }
    println!("{}", style("═".repeat(50)).dim());
}
