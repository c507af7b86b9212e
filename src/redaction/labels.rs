//! Label dictionary for label-value redaction

use crate::redaction::models::PiiCategory;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Label definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct LabelDefinition {
    /// PII category label
    pub category: PiiCategory,
    /// Literal surface forms, in match order
    pub surface_forms: Vec<String>,
}

/// Dictionary file container
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    labels: Vec<LabelDefinition>,
}

/// One surface form with its canonical category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    /// Canonical category the surface form belongs to
    pub canonical_category: PiiCategory,
    /// Literal label text as it may appear in a document
    pub surface_form: String,
}

/// Label entry with its compiled label-value regex
#[derive(Debug, Clone)]
pub struct CompiledLabel {
    /// The dictionary entry
    pub entry: LabelEntry,
    /// `(label <ws> separator <ws>)(value up to line break)`
    pub regex: Regex,
}

/// Ordered, immutable label dictionary
#[derive(Debug, Clone)]
pub struct LabelDictionary {
    labels: Vec<CompiledLabel>,
}

impl LabelDictionary {
    /// Create a label dictionary from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read label dictionary: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a label dictionary from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: DictionaryFile =
            toml::from_str(content).context("Failed to parse label dictionary TOML")?;

        let entries = file.labels.into_iter().flat_map(|def| {
            def.surface_forms
                .into_iter()
                .map(move |surface_form| LabelEntry {
                    canonical_category: def.category,
                    surface_form,
                })
        });

        Self::from_entries(entries)
    }

    /// Create a label dictionary from entries, preserving their order.
    ///
    /// Surface forms are matched literally; blank forms and forms with
    /// leading or trailing whitespace are rejected.
    ///
    /// Surface forms that repeat an earlier one case-insensitively are
    /// dropped: they would re-scan text the earlier entry already masked.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = LabelEntry>,
    {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();

        for entry in entries {
            let surface_form = entry.surface_form.as_str();
            if surface_form.trim().is_empty() {
                anyhow::bail!(
                    "Empty surface form in label dictionary (category {})",
                    entry.canonical_category
                );
            }
            if surface_form.trim() != surface_form {
                anyhow::bail!(
                    "Surface form '{}' has leading or trailing whitespace (category {})",
                    surface_form,
                    entry.canonical_category
                );
            }

            if !seen.insert(surface_form.to_lowercase()) {
                tracing::debug!(
                    surface_form = %surface_form,
                    "Skipping duplicate label surface form"
                );
                continue;
            }

            let regex = compile_label_regex(surface_form)
                .with_context(|| format!("Invalid label surface form '{surface_form}'"))?;

            labels.push(CompiledLabel { entry, regex });
        }

        Ok(Self { labels })
    }

    /// Create the built-in dictionary
    pub fn default_dictionary() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_labels.toml");
        Self::from_toml(default_toml)
    }

    /// Ordered dictionary entries
    pub fn lookup(&self) -> impl Iterator<Item = &LabelEntry> {
        self.labels.iter().map(|l| &l.entry)
    }

    /// Ordered compiled labels
    pub fn compiled(&self) -> &[CompiledLabel] {
        &self.labels
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the label-value regex for one surface form.
///
/// Whitespace around the separator is horizontal only, so a label at the end
/// of a line never captures the following line.
fn compile_label_regex(surface_form: &str) -> std::result::Result<Regex, regex::Error> {
    let pattern = format!(
        r"({}[^\S\r\n]*[:\-–][^\S\r\n]*)([^\n\r]+)",
        regex::escape(surface_form)
    );
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_dictionary() {
        let dictionary = LabelDictionary::default_dictionary().unwrap();
        assert!(!dictionary.is_empty());

        let first = dictionary.lookup().next().unwrap();
        assert_eq!(first.surface_form, "government issued id");
        assert_eq!(first.canonical_category, PiiCategory::GovernmentId);
    }

    #[test]
    fn test_default_dictionary_order() {
        let dictionary = LabelDictionary::default_dictionary().unwrap();
        let forms: Vec<&str> = dictionary
            .lookup()
            .map(|e| e.surface_form.as_str())
            .collect();

        let ssn = forms.iter().position(|f| *f == "social security number");
        let dob = forms.iter().position(|f| *f == "date of birth");
        let short_dob = forms.iter().position(|f| *f == "DOB");
        assert!(ssn < dob);
        assert!(dob < short_dob);
        assert_eq!(forms.last(), Some(&"credit card number"));
    }

    #[test]
    fn test_case_insensitive_duplicates_collapsed() {
        let dictionary = LabelDictionary::default_dictionary().unwrap();
        let ssn_forms = dictionary
            .lookup()
            .filter(|e| e.surface_form.eq_ignore_ascii_case("social security number"))
            .count();
        assert_eq!(ssn_forms, 1);
    }

    #[test]
    fn test_label_regex_groups() {
        let regex = compile_label_regex("date of birth").unwrap();
        let caps = regex.captures("Date Of Birth :  12/03/1985\nnext").unwrap();
        assert_eq!(&caps[1], "Date Of Birth :  ");
        assert_eq!(&caps[2], "12/03/1985");
    }

    #[test]
    fn test_label_regex_separators() {
        let regex = compile_label_regex("tax id").unwrap();
        assert!(regex.is_match("tax id: X"));
        assert!(regex.is_match("tax id - X"));
        assert!(regex.is_match("tax id – X"));
        assert!(!regex.is_match("tax id X"));
    }

    #[test]
    fn test_label_regex_stays_on_line() {
        let regex = compile_label_regex("passport").unwrap();
        assert!(!regex.is_match("Passport:\nX1234567"));
    }

    #[test]
    fn test_label_regex_is_literal() {
        let regex = compile_label_regex("driver's license (us)").unwrap();
        assert!(regex.is_match("Driver's License (US): D123"));
        assert!(!regex.is_match("Driver's License us: D123"));
    }

    #[test]
    fn test_empty_surface_form_rejected() {
        let toml = r#"
[[labels]]
category = "SSN"
surface_forms = ["  "]
"#;
        assert!(LabelDictionary::from_toml(toml).is_err());
    }

    #[test]
    fn test_padded_surface_form_rejected() {
        for form in [" id", "tax id ", "\tdob"] {
            let toml = format!(
                "[[labels]]\ncategory = \"TAX_ID\"\nsurface_forms = [{form:?}]\n"
            );
            let err = LabelDictionary::from_toml(&toml).unwrap_err();
            assert!(err.to_string().contains("whitespace"), "{form:?}: {err}");
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let toml = r#"
[[labels]]
category = "FAVOURITE_COLOUR"
surface_forms = ["colour"]
"#;
        assert!(LabelDictionary::from_toml(toml).is_err());
    }
}
