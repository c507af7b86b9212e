//! Redaction report
//!
//! Counts of what one engine invocation masked. Carries categories and
//! numbers only, never the masked values, so it is safe to log and audit.

use crate::redaction::models::{PiiCategory, RedactionPass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-invocation redaction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionReport {
    /// Masked spans by category
    pub by_category: BTreeMap<PiiCategory, usize>,
    /// Masked spans by engine pass
    pub by_pass: BTreeMap<RedactionPass, usize>,
    /// Total characters newly replaced by mask characters
    pub masked_chars: usize,
}

impl RedactionReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one newly masked span
    pub fn record(&mut self, pass: RedactionPass, category: PiiCategory, chars: usize) {
        *self.by_category.entry(category).or_insert(0) += 1;
        *self.by_pass.entry(pass).or_insert(0) += 1;
        self.masked_chars += chars;
    }

    /// Total number of masked spans
    pub fn total_spans(&self) -> usize {
        self.by_pass.values().sum()
    }

    /// Spans masked by a given pass
    pub fn spans_for_pass(&self, pass: RedactionPass) -> usize {
        self.by_pass.get(&pass).copied().unwrap_or(0)
    }

    /// Spans masked for a given category
    pub fn spans_for_category(&self, category: PiiCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// Whether anything was masked
    pub fn has_redactions(&self) -> bool {
        self.masked_chars > 0
    }
}

impl fmt::Display for RedactionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} spans ({} chars) masked",
            self.total_spans(),
            self.masked_chars
        )?;
        if !self.by_category.is_empty() {
            let parts: Vec<String> = self
                .by_category
                .iter()
                .map(|(category, count)| format!("{category}={count}"))
                .collect();
            write!(f, ": {}", parts.join(", "))?;
        }
        Ok(())
    }
}
