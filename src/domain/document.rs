//! Document model
//!
//! Input and intermediate values that flow through one pipeline invocation:
//! a [`RawDocument`] is consumed by extraction, which produces an
//! [`ExtractedText`]. Redaction never mutates these; it produces new strings.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Document format, sniffed from the declared filename's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Plain text (`.txt`)
    Text,
    /// Word-processor document (`.docx`)
    Docx,
    /// PDF, either digital or scanned (`.pdf`)
    Pdf,
    /// Raster image (`.jpg`, `.jpeg`, `.png`, ...)
    Image,
    /// Anything else; only OCR strategies are attempted
    Unknown,
}

impl DocumentKind {
    /// Sniff the kind from a filename.
    ///
    /// Everything after the last `.` is the extension, compared
    /// case-insensitively. A name without a dot is treated as its own
    /// extension, so a bare `txt` sniffs as text.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        let ext = lower.rsplit('.').next().unwrap_or_default();
        match ext {
            "txt" => Self::Text,
            "docx" => Self::Docx,
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" | "tif" | "tiff" | "bmp" | "gif" | "webp" => Self::Image,
            _ => Self::Unknown,
        }
    }

    /// Stable lowercase name used in logs and audit records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable input document
#[derive(Debug, Clone)]
pub struct RawDocument {
    bytes: Vec<u8>,
    declared_filename: String,
}

impl RawDocument {
    /// Default filename when the caller declares none
    pub const DEFAULT_FILENAME: &'static str = "document.pdf";

    /// Create a new raw document
    pub fn new(bytes: impl Into<Vec<u8>>, declared_filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            declared_filename: declared_filename.into(),
        }
    }

    /// Document bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Filename declared by the caller (used only for format sniffing)
    pub fn declared_filename(&self) -> &str {
        &self.declared_filename
    }

    /// Sniffed document kind
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_filename(&self.declared_filename)
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document has no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hex-encoded SHA-256 of the document bytes
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Which extraction strategy produced a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Direct (lossy) UTF-8 decode
    PlainText,
    /// Paragraph concatenation of a `.docx` body
    Docx,
    /// Embedded PDF text layer
    PdfTextLayer,
    /// Remote OCR service
    RemoteOcr,
    /// Local tesseract OCR
    LocalOcr,
}

impl StrategyKind {
    /// Stable lowercase name used in logs and audit records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Docx => "docx",
            Self::PdfTextLayer => "pdf_text_layer",
            Self::RemoteOcr => "remote_ocr",
            Self::LocalOcr => "local_ocr",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text recovered from a document, tagged with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    strategy: StrategyKind,
}

impl ExtractedText {
    /// Create a new extracted text
    pub fn new(text: impl Into<String>, strategy: StrategyKind) -> Self {
        Self {
            text: text.into(),
            strategy,
        }
    }

    /// The full text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Strategy that produced the text
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Ordered lines of the text
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Whether the text contains anything other than whitespace
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.text
    }
}
