//! Adapters around the redaction core
//!
//! - [`extraction`]: document bytes to plain text
//! - [`render`]: redacted text to PDF bytes
//!
//! Neither adapter knows about redaction; the pipeline wires them together.

pub mod extraction;
pub mod render;

pub use extraction::{ExtractionStrategy, Extractor};
pub use render::{PageLayout, PdfRenderer};
