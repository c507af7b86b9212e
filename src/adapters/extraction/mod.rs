//! Text extraction
//!
//! Turns a [`RawDocument`] into plain text. Each way of recovering text is an
//! [`ExtractionStrategy`]; the [`Extractor`] holds them as an ordered chain
//! and returns the first non-blank result.
//!
//! Default chains by document kind:
//!
//! | Kind      | Strategies                                   |
//! |-----------|----------------------------------------------|
//! | `Text`    | plain text                                   |
//! | `Docx`    | docx                                         |
//! | `Pdf`     | pdf text layer, remote OCR                   |
//! | `Image`   | remote OCR, local OCR                        |
//! | `Unknown` | remote OCR, local OCR                        |

pub mod docx;
pub mod local_ocr;
pub mod pdf_text;
pub mod plain_text;
pub mod remote_ocr;

pub use docx::DocxStrategy;
pub use local_ocr::LocalOcrStrategy;
pub use pdf_text::PdfTextLayerStrategy;
pub use plain_text::PlainTextStrategy;
pub use remote_ocr::RemoteOcrStrategy;

use crate::config::OcrConfig;
use crate::domain::{
    DocumentKind, ExtractedText, ExtractionError, RawDocument, Result, StrategyKind,
};
use crate::log_strategy_fallback;
use async_trait::async_trait;
use std::sync::Arc;

/// One way of recovering text from a document
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Strategy identifier for logs and audit records
    fn kind(&self) -> StrategyKind;

    /// Whether this strategy should be attempted for `kind`
    fn applies_to(&self, kind: DocumentKind) -> bool;

    /// Recover text from the document.
    ///
    /// Returning blank text is not an error; the chain simply moves on.
    async fn extract(&self, document: &RawDocument) -> std::result::Result<String, ExtractionError>;
}

/// Ordered fallback chain of extraction strategies
#[derive(Clone)]
pub struct Extractor {
    strategies: Vec<Arc<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Create an extractor from an explicit chain
    pub fn new(strategies: Vec<Arc<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build the default chain from OCR settings.
    ///
    /// Remote OCR joins the chain only when an API key is configured; local
    /// OCR only when enabled.
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        let mut strategies: Vec<Arc<dyn ExtractionStrategy>> = vec![
            Arc::new(PlainTextStrategy),
            Arc::new(DocxStrategy),
            Arc::new(PdfTextLayerStrategy),
        ];

        if config.has_api_key() {
            strategies.push(Arc::new(RemoteOcrStrategy::from_config(config)?));
        } else {
            tracing::info!("No OCR API key configured, remote OCR disabled");
        }

        if config.local_enabled {
            strategies.push(Arc::new(LocalOcrStrategy::from_config(config)));
        }

        Ok(Self::new(strategies))
    }

    /// Strategies in chain order
    pub fn strategies(&self) -> &[Arc<dyn ExtractionStrategy>] {
        &self.strategies
    }

    /// Strategies that will be attempted for `kind`, in order
    pub fn chain_for(&self, kind: DocumentKind) -> Vec<StrategyKind> {
        self.strategies
            .iter()
            .filter(|s| s.applies_to(kind))
            .map(|s| s.kind())
            .collect()
    }

    /// Extract text, stopping at the first strategy with non-blank output
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::Malformed`] as soon as a structured parser rejects
    ///   the document
    /// - [`ExtractionError::Empty`] when every applicable strategy failed or
    ///   produced only whitespace
    pub async fn extract(
        &self,
        document: &RawDocument,
    ) -> std::result::Result<ExtractedText, ExtractionError> {
        let kind = document.kind();

        for strategy in self.strategies.iter().filter(|s| s.applies_to(kind)) {
            match strategy.extract(document).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!(
                        strategy = %strategy.kind(),
                        chars = text.chars().count(),
                        "Text extracted"
                    );
                    return Ok(ExtractedText::new(text, strategy.kind()));
                }
                Ok(_) => {
                    tracing::debug!(strategy = %strategy.kind(), "Strategy produced no text");
                }
                Err(ExtractionError::NotApplicable(reason)) => {
                    tracing::debug!(
                        strategy = %strategy.kind(),
                        reason = %reason,
                        "Strategy skipped"
                    );
                }
                Err(e) if e.is_recoverable() => {
                    log_strategy_fallback!(strategy.kind(), &e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(ExtractionError::Empty)
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
