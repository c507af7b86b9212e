//! Local OCR strategy using the tesseract CLI
//!
//! The image is piped to `tesseract stdin stdout -l <lang>`; the process is
//! killed if it outlives the configured timeout.

use super::ExtractionStrategy;
use crate::config::OcrConfig;
use crate::domain::{DocumentKind, ExtractionError, RawDocument, StrategyKind};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Local tesseract fallback
#[derive(Debug, Clone)]
pub struct LocalOcrStrategy {
    command: String,
    language: String,
    timeout_seconds: u64,
}

impl LocalOcrStrategy {
    /// Create a strategy for an explicit command and language
    pub fn new(
        command: impl Into<String>,
        language: impl Into<String>,
        timeout_seconds: u64,
    ) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            timeout_seconds,
        }
    }

    /// Create a strategy from OCR settings
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(
            config.tesseract_command.clone(),
            config.language.clone(),
            config.local_timeout_seconds,
        )
    }

    /// Arguments passed to tesseract
    pub fn args(&self) -> Vec<&str> {
        vec!["stdin", "stdout", "-l", self.language.as_str()]
    }

    async fn run(&self, input: &[u8]) -> Result<String, ExtractionError> {
        let mut child = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExtractionError::LocalOcr(format!("failed to start {}: {e}", self.command))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input)
                .await
                .map_err(|e| ExtractionError::LocalOcr(format!("failed to send image: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExtractionError::LocalOcr(format!("failed to read output: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::LocalOcr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ExtractionStrategy for LocalOcrStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LocalOcr
    }

    /// Tesseract reads raster images only
    fn applies_to(&self, kind: DocumentKind) -> bool {
        matches!(kind, DocumentKind::Image | DocumentKind::Unknown)
    }

    async fn extract(&self, document: &RawDocument) -> Result<String, ExtractionError> {
        let timeout = Duration::from_secs(self.timeout_seconds);
        // Dropping the future on timeout drops the child, which kills it
        tokio::time::timeout(timeout, self.run(document.bytes()))
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout_seconds))?
    }
}
