//! Per-file ingestion.
//!
//! Every source file gets exactly one [`ProcessingOutcome`]. A file that
//! cannot be read, is encrypted, or does not parse is recorded and skipped;
//! ingestion itself never fails the run because of a single file.

use std::fmt;
use std::io;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, StitchError};
use crate::io::PdfReader;
use crate::merge::{DividerPage, PageBlock};
use crate::source::SourceFile;

/// Why a source file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The file does not exist.
    NotFound,
    /// The file exists but could not be read.
    Unreadable,
    /// The file was read but is not a usable PDF.
    Corrupt,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotFound => "not found",
            Self::Unreadable => "unreadable",
            Self::Corrupt => "corrupt",
        };
        f.write_str(text)
    }
}

/// Classification of a single source file after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    /// All pages were queued for assembly.
    Success {
        /// Number of content pages contributed (dividers excluded).
        page_count: usize,
    },
    /// Encrypted and not openable with an empty password.
    SkippedEncrypted,
    /// Could not be used.
    Failed {
        /// Failure category.
        reason: FailureReason,
        /// Underlying error text.
        detail: String,
    },
}

impl ProcessingOutcome {
    /// True for [`ProcessingOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Content pages contributed by this source.
    pub fn page_count(&self) -> usize {
        match self {
            Self::Success { page_count } => *page_count,
            _ => 0,
        }
    }
}

/// A recoverable problem with one source file.
#[derive(Debug, thiserror::Error)]
pub enum PerFileError {
    /// File does not exist.
    #[error("file not found")]
    NotFound,

    /// File could not be read.
    #[error("cannot read file: {source}")]
    Unreadable {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// File is encrypted and the empty password does not open it.
    #[error("file is encrypted")]
    Encrypted,

    /// File does not parse as a PDF with pages.
    #[error("{details}")]
    Corrupt {
        /// Details about the corruption.
        details: String,
    },
}

impl PerFileError {
    /// Create a Corrupt error.
    pub fn corrupt(details: impl Into<String>) -> Self {
        Self::Corrupt {
            details: details.into(),
        }
    }
}

impl From<io::Error> for PerFileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Unreadable { source: err },
        }
    }
}

impl From<PerFileError> for ProcessingOutcome {
    fn from(err: PerFileError) -> Self {
        let reason = match &err {
            PerFileError::Encrypted => return Self::SkippedEncrypted,
            PerFileError::NotFound => FailureReason::NotFound,
            PerFileError::Unreadable { .. } => FailureReason::Unreadable,
            PerFileError::Corrupt { .. } => FailureReason::Corrupt,
        };

        Self::Failed {
            reason,
            detail: err.to_string(),
        }
    }
}

/// Pages of one successfully ingested source, ready for assembly.
#[derive(Debug)]
pub struct SourcePages {
    /// Divider naming the source, when dividers are enabled.
    pub divider: Option<PageBlock>,

    /// The source's own pages, in original order.
    pub content: PageBlock,
}

/// Result of ingesting one source file.
#[derive(Debug)]
pub struct Ingested {
    /// Classification of the file.
    pub outcome: ProcessingOutcome,

    /// Pages to append, present only on success.
    pub pages: Option<SourcePages>,

    /// Time spent reading and parsing the file.
    pub load_time: Duration,

    /// PDF version of the source, when it loaded.
    pub version: Option<String>,
}

/// Ingest a single source file.
///
/// On success the returned pages hold the divider (if `dividers` is set)
/// followed by the source's content. On any per-file problem the outcome
/// carries the classification and no pages are returned.
///
/// # Errors
///
/// Only fails if the divider page cannot be generated, which is not a
/// property of the source file.
pub async fn ingest(reader: &PdfReader, source: &SourceFile, dividers: bool) -> Result<Ingested> {
    let loaded = match reader.load(source.path()).await {
        Ok(loaded) => loaded,
        Err(err) => {
            return Ok(Ingested {
                outcome: err.into(),
                pages: None,
                load_time: Duration::ZERO,
                version: None,
            });
        }
    };

    let load_time = loaded.load_time;

    let content = match PageBlock::prepare(loaded.document) {
        Ok(content) => content,
        Err(err) => {
            return Ok(Ingested {
                outcome: err.into(),
                pages: None,
                load_time,
                version: None,
            });
        }
    };
    let version = Some(content.version().to_string());

    let divider = if dividers {
        let page = DividerPage::new(source.display_name()).render()?;
        Some(
            PageBlock::prepare(page)
                .map_err(|err| StitchError::assembly_failed(format!("divider page: {err}")))?,
        )
    } else {
        None
    };

    Ok(Ingested {
        outcome: ProcessingOutcome::Success {
            page_count: content.page_count(),
        },
        pages: Some(SourcePages { divider, content }),
        load_time,
        version,
    })
}

/// Per-file line of a stitch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// The source file.
    pub source: SourceFile,

    /// Its classification.
    pub outcome: ProcessingOutcome,

    /// Whether a divider page was inserted for it.
    pub divider: bool,
}

/// Outcome counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchSummary {
    /// Sources whose pages were stitched.
    pub succeeded: usize,

    /// Sources skipped because they are encrypted.
    pub skipped_encrypted: usize,

    /// Sources that could not be read or parsed.
    pub failed: usize,

    /// Pages in the output, dividers included.
    pub total_pages: usize,

    /// Divider pages among `total_pages`.
    pub divider_pages: usize,
}

impl StitchSummary {
    /// Count one file report.
    pub fn record(&mut self, report: &FileReport) {
        match &report.outcome {
            ProcessingOutcome::Success { page_count } => {
                self.succeeded += 1;
                self.total_pages += page_count;
                if report.divider {
                    self.divider_pages += 1;
                    self.total_pages += 1;
                }
            }
            ProcessingOutcome::SkippedEncrypted => self.skipped_encrypted += 1,
            ProcessingOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Build a summary from file reports.
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.record(report);
        }
        summary
    }

    /// Number of sources processed.
    pub fn files_processed(&self) -> usize {
        self.succeeded + self.skipped_encrypted + self.failed
    }
}
