//! Configuration management for Veil.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Veil uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VEIL_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("veil.toml")?;
//! println!("Listening on {}", config.server.bind_address());
//! println!("OCR endpoint: {}", config.ocr.endpoint);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ServerConfig`] - HTTP bind address and request limits
//! - [`OcrConfig`] - Remote OCR endpoint and key, local tesseract fallback
//! - [`RedactionConfig`] - Alternate label dictionary and pattern library files
//! - [`AuditConfig`] - Audit trail
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [ocr]
//! api_key = "${OCR_API_KEY}"
//! language = "eng"
//! timeout_seconds = 30
//!
//! [audit]
//! enabled = true
//! log_path = "./audit/redaction.log"
//! ```
//!
//! # Environment Variables
//!
//! The remote OCR key is normally supplied through the environment:
//!
//! ```bash
//! export OCR_API_KEY="your-ocr-space-key"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, OCR_API_KEY_ENV};
pub use schema::{
    ApplicationConfig, AuditConfig, LoggingConfig, OcrConfig, RedactionConfig, ServerConfig,
    VeilConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
