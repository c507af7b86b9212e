//! Plain text strategy

use super::ExtractionStrategy;
use crate::domain::{DocumentKind, ExtractionError, RawDocument, StrategyKind};
use async_trait::async_trait;

/// Lossy UTF-8 decode of `.txt` documents
///
/// Invalid sequences are dropped rather than replaced, so a stray Latin-1
/// byte never turns into U+FFFD in the redacted output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextStrategy;

#[async_trait]
impl ExtractionStrategy for PlainTextStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PlainText
    }

    fn applies_to(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::Text
    }

    async fn extract(&self, document: &RawDocument) -> Result<String, ExtractionError> {
        Ok(decode_ignoring_invalid(document.bytes()))
    }
}

/// Decode UTF-8, skipping invalid byte sequences
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
