//! PDF input and output.
//!
//! - [`PdfReader`] loads one source file and classifies load failures
//! - [`PdfWriter`] writes the stitched document atomically

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
