//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Human-readable console output
//! - Optional local JSON file logging with rotation
//!
//! Log events carry sizes, kinds, hashes and counts. Document text, masked or
//! not, is never logged.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a redaction request
///
/// # Example
///
/// ```no_run
/// use veil::log_request_start;
/// use veil::domain::DocumentKind;
///
/// let request_id = uuid::Uuid::new_v4();
/// log_request_start!(request_id, DocumentKind::Pdf, 48_213usize);
/// ```
#[macro_export]
macro_rules! log_request_start {
    ($request_id:expr, $kind:expr, $size:expr) => {
        tracing::info!(
            request_id = %$request_id,
            kind = %$kind,
            size_bytes = $size,
            "Processing document"
        );
    };
}

/// Log the completion of a redaction request
///
/// # Example
///
/// ```no_run
/// use veil::log_request_complete;
/// use veil::redaction::RedactionReport;
/// use std::time::Duration;
///
/// let request_id = uuid::Uuid::new_v4();
/// let report = RedactionReport::new();
/// log_request_complete!(request_id, &report, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_request_complete {
    ($request_id:expr, $report:expr, $duration:expr) => {
        tracing::info!(
            request_id = %$request_id,
            spans = $report.total_spans(),
            masked_chars = $report.masked_chars,
            duration_ms = $duration.as_millis() as u64,
            "Document processed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use veil::log_error_with_context;
/// use veil::domain::VeilError;
///
/// let error = VeilError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log an extraction strategy failing over to the next one
///
/// # Example
///
/// ```no_run
/// use veil::log_strategy_fallback;
/// use veil::domain::{ExtractionError, StrategyKind};
///
/// let error = ExtractionError::Timeout(30);
/// log_strategy_fallback!(StrategyKind::RemoteOcr, &error);
/// ```
#[macro_export]
macro_rules! log_strategy_fallback {
    ($strategy:expr, $error:expr) => {
        tracing::warn!(
            strategy = %$strategy,
            error = %$error,
            "Extraction strategy failed, trying next"
        );
    };
}
