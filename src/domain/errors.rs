//! Domain error types
//!
//! This module defines the error hierarchy for Veil. Errors are domain-specific
//! and don't expose third-party types; HTTP status mapping lives in the server layer.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the application.
/// The redaction engine itself never produces one of these; every variant
/// originates in configuration, extraction, rendering or the serving layer.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Text extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Output rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Audit trail errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Extraction-specific errors
///
/// Only [`ExtractionError::Empty`] ever leaves the extraction adapter; the
/// remaining variants describe why a single strategy failed and are consumed
/// by the fallback chain.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Every strategy produced only whitespace
    #[error("Could not extract text")]
    Empty,

    /// The strategy does not apply to this document kind or is not configured
    #[error("Strategy not applicable: {0}")]
    NotApplicable(String),

    /// Remote OCR call failed or reported an error flag
    #[error("Remote OCR failed: {0}")]
    Upstream(String),

    /// Remote OCR or local OCR timed out
    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),

    /// Local OCR process failed
    #[error("Local OCR failed: {0}")]
    LocalOcr(String),

    /// The document structure could not be parsed
    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl ExtractionError {
    /// Whether the fallback chain may move on to the next strategy.
    ///
    /// Malformed structured documents abort the chain.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}

/// Render-specific errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF serialization failed
    #[error("Failed to write PDF: {0}")]
    PdfWrite(String),

    /// Content stream encoding failed
    #[error("Failed to encode page content: {0}")]
    ContentEncoding(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_veil_error_display() {
        let err = VeilError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_extraction_error_conversion() {
        let extraction_err = ExtractionError::Empty;
        let veil_err: VeilError = extraction_err.into();
        assert!(matches!(veil_err, VeilError::Extraction(ExtractionError::Empty)));
    }

    #[test]
    fn test_empty_extraction_message() {
        assert_eq!(ExtractionError::Empty.to_string(), "Could not extract text");
    }

    #[test]
    fn test_render_error_conversion() {
        let render_err = RenderError::PdfWrite("disk full".to_string());
        let veil_err: VeilError = render_err.into();
        assert!(matches!(veil_err, VeilError::Render(_)));
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(ExtractionError::Upstream("503".to_string()).is_recoverable());
        assert!(ExtractionError::Timeout(30).is_recoverable());
        assert!(ExtractionError::NotApplicable("no key".to_string()).is_recoverable());
        assert!(!ExtractionError::Malformed("bad zip".to_string()).is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let veil_err: VeilError = io_err.into();
        assert!(matches!(veil_err, VeilError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let veil_err: VeilError = json_err.into();
        assert!(matches!(veil_err, VeilError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let veil_err: VeilError = toml_err.into();
        assert!(matches!(veil_err, VeilError::Configuration(_)));
        assert!(veil_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_veil_error_implements_std_error() {
        let err = VeilError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
