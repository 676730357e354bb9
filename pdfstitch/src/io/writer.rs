//! PDF writing and saving operations.
//!
//! The document is serialized in memory, written to a temporary sibling of
//! the destination and renamed into place. On any failure the temporary file
//! is removed, so a failed run leaves nothing behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(mut doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(&mut doc, Path::new("output.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, StitchError};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to serialize and write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer for the stitched document.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Check that the output path can be written to.
    ///
    /// The parent directory must already exist; it is never created.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::OutputDirNotFound`] if the parent directory is
    /// missing or is not a directory.
    pub fn check_output_path(&self, path: &Path) -> Result<()> {
        let parent = output_parent(path);

        if !parent.is_dir() {
            return Err(StitchError::OutputDirNotFound {
                path: parent.to_path_buf(),
            });
        }

        Ok(())
    }

    /// Save a PDF document to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an output error if:
    /// - The parent directory doesn't exist
    /// - The file cannot be created (permissions, read-only filesystem)
    /// - Serialization or the final rename fails
    pub async fn save(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        self.check_output_path(path)?;

        let start = Instant::now();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| StitchError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        let temp_path = temp_path_for(path);

        if let Err(e) = tokio::fs::write(&temp_path, &buffer).await {
            // The temp file may exist partially written.
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StitchError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            });
        }

        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StitchError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size: buffer.len() as u64,
            output_path: path.to_path_buf(),
        })
    }
}

/// Parent directory of `path`, treating a bare file name as the current dir.
fn output_parent(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Hidden temporary sibling of `path` used while writing.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "output.pdf".as_ref()));
    name.push(".tmp");
    output_parent(path).join(name)
}
