//! pdfstitch - Stitch PDF files into a single document.
//!
//! Sources come from an explicit ordered list or from a directory filtered
//! by a file name pattern. Each source is loaded in turn; files that are
//! missing, encrypted or corrupt are reported and skipped while the rest are
//! appended, each optionally preceded by a divider page naming it.
//!
//! The run has three stages:
//!
//! 1. Input resolution ([`source::resolve_sources`])
//! 2. Per-file ingestion ([`ingest::ingest`])
//! 3. Assembly and write ([`merge::Stitcher`], [`io::PdfWriter`])
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::config::Config;
//! use pdfstitch::output::OutputFormatter;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     files: vec![PathBuf::from("b.pdf"), PathBuf::from("a.pdf")],
//!     output: PathBuf::from("combined.pdf"),
//!     ..Config::default()
//! };
//!
//! let formatter = OutputFormatter::from_config(&config);
//! let report = pdfstitch::stitch_pdfs(&config, &formatter).await?;
//! println!("Wrote {} pages", report.summary.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod io;
pub mod merge;
pub mod output;
pub mod source;
pub mod utils;

use std::path::Path;

use crate::config::InputSource;
use crate::io::PdfWriter;
use crate::merge::Stitcher;
use crate::output::display_summary;
use crate::source::{ResolvedSources, resolve_sources};

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, StitchError};
pub use ingest::{FailureReason, ProcessingOutcome, StitchSummary};
pub use merge::StitchReport;
pub use output::OutputFormatter;
pub use source::SourceFile;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run a complete stitch: resolve inputs, ingest them in order, and write
/// the output unless `config.dry_run` is set.
///
/// Per-file problems are reported through `formatter` and counted in the
/// returned report; they do not fail the run.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The input directory is unusable or nothing matches the pattern
/// - No source contributed any page ([`StitchError::NothingToWrite`])
/// - The output cannot be written
pub async fn stitch_pdfs(config: &Config, formatter: &OutputFormatter) -> Result<StitchReport> {
    config.validate()?;

    if config.has_conflicting_inputs() {
        if let Some(dir) = &config.input_dir {
            formatter.warning(&format!(
                "Both --files and --input-dir given; ignoring input directory {}",
                dir.display()
            ));
        }
    }

    let input = config.input_source()?;
    let mut resolved = resolve_sources(&input)?;

    for duplicate in &resolved.duplicates {
        formatter.warning(&format!("Ignoring duplicate input: {}", duplicate.display()));
    }

    if let InputSource::Directory { dir, pattern } = &input {
        exclude_output(&mut resolved, config.output(), formatter);
        if resolved.is_empty() {
            return Err(StitchError::NoMatchingFiles {
                dir: dir.clone(),
                pattern: pattern.clone(),
            });
        }
    }

    if formatter.is_verbose() {
        formatter.section("Files to process");
        for (index, source) in resolved.sources.iter().enumerate() {
            formatter.list_item(index + 1, &source.path().display().to_string());
        }
    }

    formatter.info(&format!("Stitching {} file(s)...", resolved.len()));
    formatter.blank_line();

    let stitcher = Stitcher::new(config.dividers);
    let result = stitcher.stitch(&resolved.sources, formatter).await?;

    formatter.blank_line();
    display_summary(formatter, &result.summary, &result.reports);

    if result.document.is_empty() {
        return Err(StitchError::NothingToWrite {
            summary: result.summary,
        });
    }

    let mut report = StitchReport {
        summary: result.summary,
        files: result.reports,
        output: config.output().to_path_buf(),
        dry_run: config.dry_run,
        output_size: None,
    };

    if config.dry_run {
        formatter.success(&format!(
            "Dry run: would write {} page(s) to {}",
            report.summary.total_pages,
            config.output().display()
        ));
        return Ok(report);
    }

    let mut document = result.document.finish();
    let stats = PdfWriter::new().save(&mut document, config.output()).await?;

    formatter.success(&format!(
        "Created {} ({})",
        stats.output_path.display(),
        stats.format_file_size()
    ));
    formatter.detail(
        "Stitch time",
        &format!("{:.2}s", result.stitch_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", stats.write_time.as_secs_f64()),
    );

    report.output_size = Some(stats.file_size);
    Ok(report)
}

/// Drop the output file from a directory listing so a rerun does not stitch
/// the previous result into itself.
fn exclude_output(resolved: &mut ResolvedSources, output: &Path, formatter: &OutputFormatter) {
    let Ok(output) = output.canonicalize() else {
        return;
    };

    resolved.sources.retain(|source| {
        let is_output = source
            .path()
            .canonicalize()
            .is_ok_and(|path| path == output);
        if is_output {
            formatter.debug(&format!(
                "Skipping {}: it is the output file",
                source.path().display()
            ));
        }
        !is_output
    });
}
