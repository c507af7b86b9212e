//! Redact command implementation
//!
//! Runs the same pipeline as the HTTP service on one local file.

use crate::cli::{EXIT_CONFIG, EXIT_NO_TEXT, EXIT_OK};
use crate::config::load_config_or_default;
use crate::domain::{ExtractionError, RawDocument, VeilError};
use crate::pipeline::DocumentPipeline;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Document to redact (.txt, .docx, .pdf or an image)
    pub input: PathBuf,

    /// Output path (default: <input>.redacted.pdf, or stdout with --text)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the redacted plain text instead of a PDF
    #[arg(long)]
    pub text: bool,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &Path) -> anyhow::Result<i32> {
        let config = match load_config_or_default(Some(config_path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        let pipeline = DocumentPipeline::from_config(&config)?;

        let bytes = std::fs::read(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let filename = self
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| RawDocument::DEFAULT_FILENAME.to_string());

        let processed = match pipeline.process(RawDocument::new(bytes, filename)).await {
            Ok(processed) => processed,
            Err(VeilError::Extraction(ExtractionError::Empty)) => {
                eprintln!("Could not extract text from {}", self.input.display());
                return Ok(EXIT_NO_TEXT);
            }
            Err(e) => return Err(e.into()),
        };

        match (self.text, self.output_path()) {
            (true, None) => print!("{}", processed.redacted_text),
            (true, Some(path)) => write_output(&path, processed.redacted_text.as_bytes())?,
            (false, path) => {
                let path = path.unwrap_or_else(|| default_output(&self.input));
                write_output(&path, &processed.pdf)?;
            }
        }

        eprintln!(
            "Redacted {} via {}: {}",
            self.input.display(),
            processed.strategy,
            processed.report
        );
        Ok(EXIT_OK)
    }

    fn output_path(&self) -> Option<PathBuf> {
        self.output.clone()
    }
}

/// `<dir>/<stem>.redacted.pdf` next to the input
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    input.with_file_name(format!("{stem}.redacted.pdf"))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(output = %path.display(), size_bytes = bytes.len(), "Output written");
    Ok(())
}
