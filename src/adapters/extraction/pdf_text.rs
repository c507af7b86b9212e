//! Embedded PDF text layer strategy
//!
//! Digital PDFs carry their text; scanned PDFs usually carry only images and
//! yield blank output here, which sends them on to OCR.

use super::ExtractionStrategy;
use crate::domain::{DocumentKind, ExtractionError, RawDocument, StrategyKind};
use async_trait::async_trait;
use lopdf::Document;

/// Text layer extraction via lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextLayerStrategy;

#[async_trait]
impl ExtractionStrategy for PdfTextLayerStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PdfTextLayer
    }

    fn applies_to(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::Pdf
    }

    async fn extract(&self, document: &RawDocument) -> Result<String, ExtractionError> {
        let bytes = document.bytes().to_vec();
        tokio::task::spawn_blocking(move || extract_text_layer(&bytes))
            .await
            .map_err(|e| ExtractionError::NotApplicable(format!("text layer parser failed: {e}")))?
    }
}

/// Extract the text of every page, in page order.
///
/// A file lopdf cannot parse is not treated as malformed: the `.pdf` name may
/// simply be the default for an upload that is really an image, so OCR still
/// gets a chance.
pub fn extract_text_layer(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pdf = Document::load_mem(bytes)
        .map_err(|e| ExtractionError::NotApplicable(format!("not a parseable PDF: {e}")))?;

    let pages: Vec<u32> = pdf.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Ok(String::new());
    }

    let mut text = String::new();
    for page in pages {
        match pdf.extract_text(&[page]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                tracing::debug!(page, error = %e, "No text layer on page");
            }
        }
    }

    Ok(text)
}
