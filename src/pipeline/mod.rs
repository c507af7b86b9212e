//! Document pipeline
//!
//! `extract -> redact -> render` for one document. Extraction is async (it
//! may call out to OCR); redaction and rendering are CPU-bound and run on the
//! blocking pool. Each invocation is independent and nothing is persisted
//! except the optional audit record.

pub mod audit;

pub use audit::{AuditLogger, AuditOutcome, AuditRecord};

use crate::adapters::{Extractor, PdfRenderer};
use crate::config::VeilConfig;
use crate::domain::{ExtractionError, RawDocument, Result, StrategyKind, VeilError};
use crate::redaction::{engine_from_config, RedactionEngine, RedactionReport};
use crate::{log_error_with_context, log_request_complete, log_request_start};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Result of processing one document
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    /// Request id recorded in logs and the audit trail
    pub request_id: Uuid,
    /// Strategy that recovered the text
    pub strategy: StrategyKind,
    /// Redacted plain text
    pub redacted_text: String,
    /// Rendered PDF
    pub pdf: Vec<u8>,
    /// What was masked
    pub report: RedactionReport,
}

/// Shared, cloneable pipeline
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    extractor: Extractor,
    engine: RedactionEngine,
    renderer: PdfRenderer,
    audit: Arc<AuditLogger>,
}

impl DocumentPipeline {
    /// Assemble a pipeline from its parts
    pub fn new(
        extractor: Extractor,
        engine: RedactionEngine,
        renderer: PdfRenderer,
        audit: Arc<AuditLogger>,
    ) -> Self {
        Self {
            extractor,
            engine,
            renderer,
            audit,
        }
    }

    /// Build the pipeline described by `config`
    pub fn from_config(config: &VeilConfig) -> Result<Self> {
        let extractor = Extractor::from_config(&config.ocr)?;
        let engine = engine_from_config(&config.redaction)
            .map_err(|e| VeilError::Configuration(format!("{e:#}")))?;
        let audit = AuditLogger::new(&config.audit.log_path, config.audit.enabled)
            .map_err(|e| VeilError::Audit(format!("{e:#}")))?;

        tracing::info!(
            strategies = ?extractor.strategies().iter().map(|s| s.kind()).collect::<Vec<_>>(),
            labels = engine.dictionary().len(),
            patterns = engine.library().len(),
            audit_enabled = audit.is_enabled(),
            "Pipeline initialized"
        );

        Ok(Self::new(
            extractor,
            engine,
            PdfRenderer::default(),
            Arc::new(audit),
        ))
    }

    /// The redaction engine in use
    pub fn engine(&self) -> &RedactionEngine {
        &self.engine
    }

    /// The extraction chain in use
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Process a document under a fresh request id
    pub async fn process(&self, document: RawDocument) -> Result<ProcessedDocument> {
        self.process_with_id(document, Uuid::new_v4()).await
    }

    /// Process a document under the caller's request id
    ///
    /// # Errors
    ///
    /// - [`VeilError::Extraction`] with [`ExtractionError::Empty`] when no text
    ///   could be recovered
    /// - any other [`VeilError`] for unexpected failures
    pub async fn process_with_id(
        &self,
        document: RawDocument,
        request_id: Uuid,
    ) -> Result<ProcessedDocument> {
        let started = Instant::now();
        let kind = document.kind();
        log_request_start!(request_id, kind, document.len());

        let result = self.run(&document, request_id).await;

        let elapsed = started.elapsed();
        let (outcome, strategy, report) = match &result {
            Ok(processed) => {
                log_request_complete!(request_id, &processed.report, elapsed);
                (
                    AuditOutcome::Redacted,
                    Some(processed.strategy),
                    processed.report.clone(),
                )
            }
            Err(VeilError::Extraction(ExtractionError::Empty)) => {
                tracing::info!(
                    request_id = %request_id,
                    kind = %kind,
                    "No text could be extracted"
                );
                (AuditOutcome::ExtractionEmpty, None, RedactionReport::new())
            }
            Err(e) => {
                log_error_with_context!(e, "Document processing failed");
                (AuditOutcome::Failed, None, RedactionReport::new())
            }
        };

        self.write_audit(AuditRecord {
            timestamp: Utc::now(),
            request_id,
            document_kind: kind,
            input_bytes: document.len(),
            input_sha256: document.sha256_hex(),
            strategy,
            outcome,
            report,
            processing_time_ms: elapsed.as_millis() as u64,
        });

        result
    }

    async fn run(&self, document: &RawDocument, request_id: Uuid) -> Result<ProcessedDocument> {
        let extracted = self.extractor.extract(document).await?;
        let strategy = extracted.strategy();

        let engine = self.engine.clone();
        let renderer = self.renderer.clone();
        let (redacted_text, report, pdf) = tokio::task::spawn_blocking(move || {
            let (redacted, report) = engine.redact_with_report(extracted.as_str());
            let pdf = renderer.render(&redacted)?;
            Ok::<_, VeilError>((redacted, report, pdf))
        })
        .await
        .map_err(|e| VeilError::Other(format!("Processing task failed: {e}")))??;

        tracing::debug!(
            request_id = %request_id,
            strategy = %strategy,
            report = %report,
            "Text redacted"
        );

        Ok(ProcessedDocument {
            request_id,
            strategy,
            redacted_text,
            pdf,
            report,
        })
    }

    fn write_audit(&self, record: AuditRecord) {
        if let Err(e) = self.audit.log_record(&record) {
            tracing::error!(
                request_id = %record.request_id,
                error = %format!("{e:#}"),
                "Failed to write audit record"
            );
        }
    }
}
