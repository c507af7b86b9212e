//! Domain models and types for Veil.
//!
//! The domain layer provides:
//! - **Document model** ([`RawDocument`], [`DocumentKind`], [`ExtractedText`])
//! - **Error types** ([`VeilError`], [`ExtractionError`], [`RenderError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations outside the redaction engine return
//! [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{RawDocument, DocumentKind, Result};
//!
//! fn example() -> Result<()> {
//!     let doc = RawDocument::new(b"DOB: 01/02/1980".to_vec(), "intake.txt");
//!     assert_eq!(doc.kind(), DocumentKind::Text);
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{DocumentKind, ExtractedText, RawDocument, StrategyKind};
pub use errors::{ExtractionError, RenderError, VeilError};
pub use result::Result;
