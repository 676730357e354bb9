//! Core stitching loop.
//!
//! Sources are ingested and appended one at a time, in order. Each source's
//! divider (when enabled) lands immediately before its pages, and a source
//! that is skipped or fails contributes nothing, not even a divider.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::Result;
use crate::ingest::{FileReport, StitchSummary, ingest};
use crate::io::PdfReader;
use crate::merge::OutputDocument;
use crate::output::{OutputFormatter, display_outcome};
use crate::source::SourceFile;

/// Result of running the stitcher over all sources.
#[derive(Debug)]
pub struct StitchResult {
    /// Accumulated document, not yet finished.
    pub document: OutputDocument,

    /// One report per source, in input order.
    pub reports: Vec<FileReport>,

    /// Outcome counts.
    pub summary: StitchSummary,

    /// Total time spent ingesting and appending.
    pub stitch_time: Duration,
}

/// Final report of a stitch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchReport {
    /// Outcome counts.
    pub summary: StitchSummary,

    /// Per-file outcomes, in input order.
    pub files: Vec<FileReport>,

    /// Output path, written or (in dry-run mode) would-be.
    pub output: PathBuf,

    /// Whether the write was skipped.
    pub dry_run: bool,

    /// Size of the written file in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
}

impl StitchReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Stitcher that folds source files into one output document.
#[derive(Debug, Clone, Default)]
pub struct Stitcher {
    reader: PdfReader,
    dividers: bool,
}

impl Stitcher {
    /// Create a stitcher, with or without divider pages.
    pub fn new(dividers: bool) -> Self {
        Self {
            reader: PdfReader::new(),
            dividers,
        }
    }

    /// Ingest every source in order and append its pages.
    ///
    /// Per-file problems are reported through `formatter` and recorded in the
    /// result; they never stop the loop.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::AssemblyFailed`](crate::error::StitchError::AssemblyFailed)
    /// if the output page tree cannot be updated.
    pub async fn stitch(
        &self,
        sources: &[SourceFile],
        formatter: &OutputFormatter,
    ) -> Result<StitchResult> {
        let start = Instant::now();
        let mut document = OutputDocument::new();
        let mut reports = Vec::with_capacity(sources.len());
        let mut summary = StitchSummary::default();

        for (index, source) in sources.iter().enumerate() {
            formatter.debug(&format!(
                "[{}/{}] {}",
                index + 1,
                sources.len(),
                source.path().display()
            ));

            let ingested = ingest(&self.reader, source, self.dividers).await?;

            let mut divider = false;
            if let Some(pages) = ingested.pages {
                divider = pages.divider.is_some();
                document.append_all(pages.divider.into_iter().chain([pages.content]))?;
            }

            let report = FileReport {
                source: source.clone(),
                outcome: ingested.outcome,
                divider,
            };

            display_outcome(
                formatter,
                &report,
                ingested.load_time,
                ingested.version.as_deref(),
            );

            summary.record(&report);
            reports.push(report);
        }

        Ok(StitchResult {
            document,
            reports,
            summary,
            stitch_time: start.elapsed(),
        })
    }
}
