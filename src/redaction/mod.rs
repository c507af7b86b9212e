//! PII redaction
//!
//! The redaction core: a static label dictionary, a static pattern library,
//! and the [`RedactionEngine`] that applies them to plain text. Nothing in
//! this module performs I/O after construction, and nothing here can fail at
//! redaction time.
//!
//! Built-in data is embedded from `patterns/pii_labels.toml` and
//! `patterns/pii_patterns.toml`; alternate files can be loaded with
//! [`LabelDictionary::from_file`] and [`PatternLibrary::from_file`].

pub mod engine;
pub mod labels;
pub mod mask;
pub mod models;
pub mod patterns;
pub mod report;

pub use engine::RedactionEngine;
pub use labels::{LabelDictionary, LabelEntry};
pub use mask::{mask, MASK_CHAR};
pub use models::{PiiCategory, RedactionPass};
pub use patterns::{PatternEntry, PatternLibrary};
pub use report::RedactionReport;

use crate::config::RedactionConfig;
use anyhow::Result;
use std::sync::Arc;

/// Build an engine from configuration, using built-in data where no file is set
pub fn engine_from_config(config: &RedactionConfig) -> Result<RedactionEngine> {
    let dictionary = match &config.label_dictionary {
        Some(path) => LabelDictionary::from_file(path)?,
        None => LabelDictionary::default_dictionary()?,
    };
    let library = match &config.pattern_library {
        Some(path) => PatternLibrary::from_file(path)?,
        None => PatternLibrary::default_patterns()?,
    };

    tracing::debug!(
        labels = dictionary.len(),
        patterns = library.len(),
        "Redaction engine initialized"
    );

    Ok(RedactionEngine::new(Arc::new(dictionary), Arc::new(library)))
}
