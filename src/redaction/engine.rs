//! Redaction engine
//!
//! This module provides the core [`RedactionEngine`]: a pure `text -> text`
//! transformation that masks PII in three ordered passes.
//!
//! # Passes
//!
//! 1. **Label-value**: for every dictionary label, in dictionary order, the
//!    value following `label <sep>` up to the line break is masked. Each label
//!    scans the output of the previous one.
//! 2. **Pattern**: every library pattern, in declared order, masks all of its
//!    non-overlapping leftmost matches.
//! 3. **Catch-all**: any word-bounded run of six or more digits is masked.
//!
//! Each pass consumes the previous pass's output. Every substitution keeps the
//! character count of the span it replaces, and running the engine on its own
//! output changes nothing.
//!
//! # Examples
//!
//! ```
//! use veil::redaction::RedactionEngine;
//!
//! let engine = RedactionEngine::with_defaults()?;
//! let redacted = engine.redact("Social Security Number: 123-45-6789\nName: Alice");
//! assert_eq!(redacted, "Social Security Number: ███████████\nName: Alice");
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::redaction::{
    labels::LabelDictionary,
    mask::{mask, unmasked_chars},
    models::{PiiCategory, RedactionPass},
    patterns::PatternLibrary,
    report::RedactionReport,
};
use anyhow::Result;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::Arc;

/// Catch-all rule: six or more consecutive digits between word boundaries
const LONG_DIGIT_RUN: &str = r"\b\d{6,}\b";

/// Main redaction engine
///
/// # Thread Safety
///
/// The engine holds only immutable data behind `Arc`s and can be cloned or
/// shared freely across tasks without locking.
#[derive(Debug, Clone)]
pub struct RedactionEngine {
    dictionary: Arc<LabelDictionary>,
    library: Arc<PatternLibrary>,
    catch_all: Regex,
}

impl RedactionEngine {
    /// Create a new engine from an explicit dictionary and pattern library
    pub fn new(dictionary: Arc<LabelDictionary>, library: Arc<PatternLibrary>) -> Self {
        Self {
            dictionary,
            library,
            catch_all: catch_all_regex(),
        }
    }

    /// Create an engine with the built-in dictionary and pattern library
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            Arc::new(LabelDictionary::default_dictionary()?),
            Arc::new(PatternLibrary::default_patterns()?),
        ))
    }

    /// Redact PII from `text`.
    ///
    /// Total over all inputs: never fails, and returns an empty string for
    /// empty input.
    pub fn redact(&self, text: &str) -> String {
        self.redact_with_report(text).0
    }

    /// Redact PII from `text` and report what was masked
    pub fn redact_with_report(&self, text: &str) -> (String, RedactionReport) {
        let mut report = RedactionReport::new();
        if text.is_empty() {
            return (String::new(), report);
        }

        let text = self.label_pass(text.to_string(), &mut report);
        let text = self.pattern_pass(text, &mut report);
        let text = self.catch_all_pass(text, &mut report);

        (text, report)
    }

    /// The label dictionary in use
    pub fn dictionary(&self) -> &LabelDictionary {
        &self.dictionary
    }

    /// The pattern library in use
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Pass 1: sequential fold over the dictionary
    fn label_pass(&self, text: String, report: &mut RedactionReport) -> String {
        self.dictionary
            .compiled()
            .iter()
            .fold(text, |text, label| {
                let category = label.entry.canonical_category;
                replace_all(&label.regex, text, |caps| {
                    let value = &caps[2];
                    // Only characters this match newly masks are reported
                    let newly_masked = unmasked_chars(value);
                    if newly_masked > 0 {
                        report.record(RedactionPass::Label, category, newly_masked);
                    }
                    format!("{}{}", &caps[1], mask(value))
                })
            })
    }

    /// Pass 2: named patterns in declared order
    fn pattern_pass(&self, text: String, report: &mut RedactionReport) -> String {
        self.library
            .all_patterns()
            .iter()
            .fold(text, |text, pattern| {
                replace_all(&pattern.regex, text, |caps| {
                    let span = &caps[0];
                    report.record(RedactionPass::Pattern, pattern.category, span.chars().count());
                    mask(span)
                })
            })
    }

    /// Pass 3: long digit runs
    fn catch_all_pass(&self, text: String, report: &mut RedactionReport) -> String {
        replace_all(&self.catch_all, text, |caps| {
            let span = &caps[0];
            report.record(
                RedactionPass::CatchAll,
                PiiCategory::LongNumber,
                span.chars().count(),
            );
            mask(span)
        })
    }
}

/// Replace every match, reusing the input allocation when nothing matched
fn replace_all<F>(regex: &Regex, text: String, replacer: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let replaced = match regex.replace_all(&text, replacer) {
        Cow::Borrowed(_) => None,
        Cow::Owned(replaced) => Some(replaced),
    };
    replaced.unwrap_or(text)
}

fn catch_all_regex() -> Regex {
    Regex::new(LONG_DIGIT_RUN).expect("Failed to compile catch-all regex")
}
