//! PDF reading and loading operations.
//!
//! Files are read into memory in one call, so the handle is closed before
//! parsing starts, whatever the outcome. Load failures are classified into
//! [`PerFileError`]s rather than run-wide errors.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() {
//! let reader = PdfReader::new();
//! match reader.load(Path::new("document.pdf")).await {
//!     Ok(loaded) => println!("{} pages", loaded.document.get_pages().len()),
//!     Err(err) => eprintln!("skipping: {err}"),
//! }
//! # }
//! ```

use lopdf::{Document, Object};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::ingest::PerFileError;

/// A loaded, decrypted PDF document.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Time taken to read and parse the document.
    pub load_time: Duration,
}

/// PDF reader for source files.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// Encrypted documents are opened with the empty password when possible.
    /// lopdf tries that password while parsing; a document it could open
    /// comes back with `encryption_state` set and plaintext objects, and is
    /// only stripped of its `Encrypt` entry here.
    ///
    /// # Errors
    ///
    /// Returns a [`PerFileError`] if:
    /// - File does not exist or cannot be read
    /// - File is encrypted with a non-empty password
    /// - File is empty, not a PDF, or has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf, PerFileError> {
        let start = Instant::now();

        let bytes = tokio::fs::read(path).await?;

        if bytes.is_empty() {
            return Err(PerFileError::corrupt("File is empty"));
        }

        let mut document = Document::load_mem(&bytes).map_err(classify_load_error)?;

        if document.is_encrypted() {
            if document.encryption_state.is_none() {
                return Err(PerFileError::Encrypted);
            }
            // Already decrypted; decrypting again would scramble the content.
            if let Some(Object::Reference(id)) = document.trailer.remove(b"Encrypt") {
                document.objects.remove(&id);
            }
        }

        if document.get_pages().is_empty() {
            return Err(PerFileError::corrupt("PDF has no pages"));
        }

        Ok(LoadedPdf {
            document,
            load_time: start.elapsed(),
        })
    }
}

/// Map a parse failure to encrypted or corrupt.
fn classify_load_error(err: lopdf::Error) -> PerFileError {
    let message = err.to_string();
    if mentions_encryption(&message) {
        PerFileError::Encrypted
    } else {
        PerFileError::corrupt(message)
    }
}

fn mentions_encryption(message: &str) -> bool {
    let message = message.to_lowercase();
    ["encrypt", "decrypt", "password"]
        .iter()
        .any(|needle| message.contains(needle))
}
