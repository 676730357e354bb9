//! Error types for pdfstitch.
//!
//! Only run-wide problems are errors here. A source file that is missing,
//! encrypted or corrupt is not an error: ingestion records it as a
//! [`ProcessingOutcome`](crate::ingest::ProcessingOutcome) and the run goes on.
//!
//! # Error Categories
//!
//! - **Configuration**: option combinations rejected before anything runs
//! - **Input**: the input directory is unusable or nothing matched
//! - **Output**: nothing to write, or the destination cannot be written

use std::io;
use std::path::PathBuf;

use crate::ingest::StitchSummary;

/// Result type alias for pdfstitch operations.
pub type Result<T> = std::result::Result<T, StitchError>;

/// Main error type for pdfstitch operations.
#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Input directory does not exist.
    #[error("Input directory does not exist: {}", path.display())]
    InputDirNotFound {
        /// Directory that was requested.
        path: PathBuf,
    },

    /// Input path exists but is not a directory.
    #[error("Input path is not a directory: {}", path.display())]
    NotADirectory {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Input directory could not be listed.
    #[error("Failed to list input directory: {}\n  Reason: {source}", path.display())]
    FailedToListDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying directory walk error.
        source: walkdir::Error,
    },

    /// No file in the input directory matched the pattern.
    #[error(
        "No files matching '{pattern}' found in: {}\n  Hint: use --pattern to change the filter or --files to list inputs explicitly",
        dir.display()
    )]
    NoMatchingFiles {
        /// Directory that was searched.
        dir: PathBuf,
        /// Pattern that was applied.
        pattern: String,
    },

    /// Every source was skipped or failed, so there is nothing to write.
    #[error(
        "No pages could be assembled: {} skipped (encrypted), {} failed",
        summary.skipped_encrypted,
        summary.failed
    )]
    NothingToWrite {
        /// Outcome counts of the run.
        summary: StitchSummary,
    },

    /// Parent directory of the output path does not exist.
    #[error("Output directory does not exist: {}", path.display())]
    OutputDirNotFound {
        /// Missing parent directory.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The page tree of the output document could not be updated.
    #[error("Assembly failed: {reason}")]
    AssemblyFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl StitchError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an AssemblyFailed error.
    pub fn assembly_failed(reason: impl Into<String>) -> Self {
        Self::AssemblyFailed {
            reason: reason.into(),
        }
    }

    /// True for errors raised while resolving input files.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputDirNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::FailedToListDir { .. }
                | Self::NoMatchingFiles { .. }
        )
    }

    /// True for errors raised while assembling or writing the output.
    pub fn is_output_error(&self) -> bool {
        matches!(
            self,
            Self::NothingToWrite { .. }
                | Self::OutputDirNotFound { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::AssemblyFailed { .. }
                | Self::Io { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => 1,
            Self::InputDirNotFound { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::FailedToListDir { .. } => 2,
            Self::NoMatchingFiles { .. } => 2,
            Self::NothingToWrite { .. } => 3,
            Self::OutputDirNotFound { .. } => 5,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::AssemblyFailed { .. } => 6,
            Self::Io { .. } => 5,
        }
    }
}
