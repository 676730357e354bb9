//! Output formatting and display for pdfstitch.
//!
//! This module handles all user-facing output including:
//! - One line per processed source file
//! - Warning and error display
//! - The end-of-run summary, followed by the files that were not stitched
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::output::OutputFormatter;
//! use pdfstitch::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Stitching documents");
//! formatter.success("Stitch completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::time::Duration;

use crate::ingest::{FileReport, ProcessingOutcome, StitchSummary};

/// Display the outcome line for one source file.
///
/// Skipped and failed files are shown even in quiet mode.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `report` - Outcome of the file
/// * `load_time` - Time spent loading it
/// * `version` - PDF version of the file, when it loaded
pub fn display_outcome(
    formatter: &OutputFormatter,
    report: &FileReport,
    load_time: Duration,
    version: Option<&str>,
) {
    let name = report.source.display_name();

    match &report.outcome {
        ProcessingOutcome::Success { page_count } => {
            formatter.success(&format!("Added {name} ({})", pages(*page_count)));
            if let Some(version) = version {
                formatter.detail("PDF version", version);
            }
            formatter.detail("Load time", &format!("{:.3}s", load_time.as_secs_f64()));
        }
        ProcessingOutcome::SkippedEncrypted => {
            formatter.warning(&format!("Skipped {name}: encrypted"));
        }
        ProcessingOutcome::Failed { reason, detail } => {
            formatter.error(&format!("Failed {name}: {reason} ({detail})"));
        }
    }
}

/// Display the end-of-run summary.
///
/// Files that were skipped or failed are listed again after the counts, on
/// stderr, so they stay visible at the end of a long run.
pub fn display_summary(
    formatter: &OutputFormatter,
    summary: &StitchSummary,
    reports: &[FileReport],
) {
    let mut line = format!(
        "Processed {} file(s): {} succeeded, {} skipped (encrypted), {} failed; {} total",
        summary.files_processed(),
        summary.succeeded,
        summary.skipped_encrypted,
        summary.failed,
        pages(summary.total_pages),
    );

    if summary.divider_pages > 0 {
        line.push_str(&format!(" ({} divider)", summary.divider_pages));
    }

    formatter.info(&line);

    let unstitched = unstitched_lines(reports);
    if !unstitched.is_empty() {
        formatter.warning(&format!("{} file(s) not stitched:", unstitched.len()));
        for item in &unstitched {
            formatter.diagnostic_item(item);
        }
    }
}

/// One line per report that contributed no pages: its path and why.
fn unstitched_lines(reports: &[FileReport]) -> Vec<String> {
    reports
        .iter()
        .filter_map(|report| {
            let why = match &report.outcome {
                ProcessingOutcome::Success { .. } => return None,
                ProcessingOutcome::SkippedEncrypted => "encrypted".to_string(),
                ProcessingOutcome::Failed { reason, .. } => reason.to_string(),
            };
            Some(format!("{} ({why})", report.source.path().display()))
        })
        .collect()
}

fn pages(count: usize) -> String {
    if count == 1 {
        "1 page".to_string()
    } else {
        format!("{count} pages")
    }
}
