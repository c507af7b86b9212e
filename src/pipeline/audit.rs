//! Audit trail for processed documents
//!
//! One JSON line per request. Records carry the input's SHA-256, the
//! extraction strategy and redaction counts; document text never enters the
//! audit log.

use crate::domain::{DocumentKind, StrategyKind};
use crate::redaction::RedactionReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Outcome of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// A redacted PDF was produced
    Redacted,
    /// No strategy recovered any text
    ExtractionEmpty,
    /// Unexpected failure
    Failed,
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When processing finished
    pub timestamp: DateTime<Utc>,
    /// Request id, also returned as `X-Request-Id`
    pub request_id: Uuid,
    /// Kind sniffed from the declared filename
    pub document_kind: DocumentKind,
    /// Input size in bytes
    pub input_bytes: usize,
    /// SHA-256 of the input bytes (hex)
    pub input_sha256: String,
    /// Strategy that produced the text, if any did
    pub strategy: Option<StrategyKind>,
    /// Request outcome
    pub outcome: AuditOutcome,
    /// Redaction counts; empty unless the outcome is `Redacted`
    pub report: RedactionReport,
    /// Wall time spent on the request
    pub processing_time_ms: u64,
}

/// Append-only JSON-lines audit logger
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
    // Serializes appends so concurrent requests never interleave lines
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the parent directory when enabled
    pub fn new(log_path: impl Into<PathBuf>, enabled: bool) -> Result<Self> {
        let log_path = log_path.into();
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    /// A logger that records nothing
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            enabled: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Whether records are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Audit log location
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append one record
    pub fn log_record(&self, record: &AuditRecord) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let json_line = serde_json::to_string(record).context("Failed to serialize audit entry")?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Audit log lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        writeln!(file, "{json_line}").context("Failed to write audit entry")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::{PiiCategory, RedactionPass};
    use tempfile::tempdir;

    fn record(outcome: AuditOutcome) -> AuditRecord {
        let mut report = RedactionReport::new();
        report.record(RedactionPass::Pattern, PiiCategory::Email, 17);
        AuditRecord {
            timestamp: Utc::now(),
            request_id: Uuid::new_v4(),
            document_kind: DocumentKind::Text,
            input_bytes: 38,
            input_sha256: "ab".repeat(32),
            strategy: Some(StrategyKind::PlainText),
            outcome,
            report,
            processing_time_ms: 3,
        }
    }

    #[test]
    fn test_audit_logger_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");

        let logger = AuditLogger::new(&log_path, true).unwrap();
        assert!(logger.is_enabled());
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_log_record_appends_json_lines() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(&log_path, true).unwrap();

        logger.log_record(&record(AuditOutcome::Redacted)).unwrap();
        logger.log_record(&record(AuditOutcome::ExtractionEmpty)).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["outcome"], "redacted");
        assert_eq!(first["strategy"], "plain_text");
        assert_eq!(first["report"]["by_category"]["EMAIL"], 1);

        let second: AuditRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.outcome, AuditOutcome::ExtractionEmpty);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(&log_path, false).unwrap();

        logger.log_record(&record(AuditOutcome::Redacted)).unwrap();
        assert!(!log_path.exists());
        assert!(!AuditLogger::disabled().is_enabled());
    }
}
