//! Configuration schema types
//!
//! Every section has defaults, so an absent file or an empty file yields a
//! usable configuration; only the OCR API key normally comes from the
//! environment.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Veil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// OCR settings (remote service and local fallback)
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Label dictionary and pattern library overrides
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.ocr.validate()?;
        self.redaction.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("server.port must be greater than 0".to_string());
        }

        if self.max_body_bytes == 0 {
            return Err("server.max_body_bytes must be greater than 0".to_string());
        }

        if self.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OCR configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Remote OCR endpoint
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,

    /// Remote OCR API key; remote OCR is skipped when absent
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// OCR language code
    #[serde(default = "default_ocr_language")]
    pub language: String,

    /// Remote OCR request timeout in seconds
    #[serde(default = "default_ocr_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Enable the local tesseract fallback
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Tesseract executable name or path
    #[serde(default = "default_tesseract_command")]
    pub tesseract_command: String,

    /// Local OCR timeout in seconds
    #[serde(default = "default_local_timeout_seconds")]
    pub local_timeout_seconds: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ocr_endpoint(),
            api_key: None,
            language: default_ocr_language(),
            timeout_seconds: default_ocr_timeout_seconds(),
            local_enabled: true,
            tesseract_command: default_tesseract_command(),
            local_timeout_seconds: default_local_timeout_seconds(),
        }
    }
}

impl OcrConfig {
    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid ocr.endpoint '{}': {}", self.endpoint, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "ocr.endpoint must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.language.trim().is_empty() {
            return Err("ocr.language cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "ocr.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        if self.local_enabled {
            if self.tesseract_command.trim().is_empty() {
                return Err("ocr.tesseract_command cannot be empty".to_string());
            }
            if self.local_timeout_seconds == 0 || self.local_timeout_seconds > 600 {
                return Err(format!(
                    "ocr.local_timeout_seconds must be between 1 and 600, got {}",
                    self.local_timeout_seconds
                ));
            }
        }

        Ok(())
    }

    /// Whether a usable remote OCR API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_blank())
    }
}

/// Redaction data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Path to a label dictionary TOML file (built-in dictionary when unset)
    #[serde(default)]
    pub label_dictionary: Option<PathBuf>,

    /// Path to a pattern library TOML file (built-in library when unset)
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,
}

impl RedactionConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, path) in [
            ("redaction.label_dictionary", &self.label_dictionary),
            ("redaction.pattern_library", &self.pattern_library),
        ] {
            if let Some(path) = path {
                if !path.exists() {
                    return Err(format!("{key} file not found: {}", path.display()));
                }
                if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                    return Err(format!("{key} must be a TOML file: {}", path.display()));
                }
            }
        }
        Ok(())
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the audit trail
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path (JSON lines)
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_request_timeout_seconds() -> u64 {
    180
}

fn default_ocr_endpoint() -> String {
    "https://api.ocr.space/parse/image".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_ocr_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_tesseract_command() -> String {
    "tesseract".to_string()
}

fn default_local_timeout_seconds() -> u64 {
    60
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redaction.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
