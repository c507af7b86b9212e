//! Pattern library for structural PII detection

use crate::redaction::models::PiiCategory;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Pattern name, used in error messages and debug logs
    pub name: String,
    /// PII category label
    pub category: PiiCategory,
    /// Regex source
    pub regex: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct PatternEntry {
    /// Pattern name
    pub name: String,
    /// PII category
    pub category: PiiCategory,
    /// Compiled regex
    pub regex: Regex,
}

/// Pattern library file container
#[derive(Debug, Deserialize)]
struct PatternFile {
    patterns: Vec<PatternDefinition>,
}

/// Ordered, immutable pattern library
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<PatternEntry>,
}

impl PatternLibrary {
    /// Create a pattern library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern library from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: PatternFile =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::with_capacity(file.patterns.len());
        for def in file.patterns {
            let regex = Regex::new(&def.regex).with_context(|| {
                format!("Invalid regex in pattern '{}': {}", def.name, def.regex)
            })?;

            patterns.push(PatternEntry {
                name: def.name,
                category: def.category,
                regex,
            });
        }

        Ok(Self { patterns })
    }

    /// Create the built-in pattern library
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns in declared order
    pub fn all_patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    /// Get patterns for a specific category
    pub fn patterns_for_category(&self, category: PiiCategory) -> Vec<&PatternEntry> {
        self.patterns
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the library has no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
