//! Page assembly.
//!
//! - [`PageBlock`]: a loaded document prepared for re-parenting
//! - [`DividerPage`]: the generated page announcing each source
//! - [`OutputDocument`]: the accumulator the blocks are appended to
//! - [`Stitcher`]: the sequential ingest-and-append loop

pub mod divider;
pub mod document;
pub mod stitcher;

pub use divider::DividerPage;
pub use document::{OutputDocument, PageBlock};
pub use stitcher::{StitchReport, StitchResult, Stitcher};
