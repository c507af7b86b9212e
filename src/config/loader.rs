//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VeilConfig;
use super::secret::secret_string_opt;
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the remote OCR API key
pub const OCR_API_KEY_ENV: &str = "OCR_API_KEY";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VeilConfig
/// 4. Applies environment variable overrides (VEIL_* prefix and `OCR_API_KEY`)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use veil::config::loader::load_config;
///
/// let config = load_config("veil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VeilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VeilError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// `serve` and `redact` run without any config file; in that case the
/// built-in defaults plus environment overrides are used. A file that exists
/// but is invalid is still an error.
pub fn load_config_or_default(path: Option<&Path>) -> Result<VeilConfig> {
    match path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            tracing::debug!(
                path = %path.display(),
                "Configuration file not found, using defaults"
            );
            finish(VeilConfig::default())
        }
        None => finish(VeilConfig::default()),
    }
}

fn finish(mut config: VeilConfig) -> Result<VeilConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("Invalid env var pattern");
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies overrides from the process environment
fn apply_env_overrides(config: &mut VeilConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Applies overrides using the VEIL_<SECTION>_<KEY> naming scheme
///
/// Values that fail to parse are ignored and the file value is kept.
/// `OCR_API_KEY` takes precedence over `VEIL_OCR_API_KEY`.
fn apply_overrides<F>(config: &mut VeilConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // Application overrides
    if let Some(val) = lookup("VEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Some(val) = lookup("VEIL_SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(port) = lookup("VEIL_SERVER_PORT").and_then(|v| v.parse().ok()) {
        config.server.port = port;
    }
    if let Some(max) = lookup("VEIL_SERVER_MAX_BODY_BYTES").and_then(|v| v.parse().ok()) {
        config.server.max_body_bytes = max;
    }
    if let Some(secs) = lookup("VEIL_SERVER_REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse().ok())
    {
        config.server.request_timeout_seconds = secs;
    }

    // OCR overrides
    if let Some(val) = lookup("VEIL_OCR_ENDPOINT") {
        config.ocr.endpoint = val;
    }
    if let Some(val) = lookup("VEIL_OCR_LANGUAGE") {
        config.ocr.language = val;
    }
    if let Some(secs) = lookup("VEIL_OCR_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        config.ocr.timeout_seconds = secs;
    }
    if let Some(enabled) = lookup("VEIL_OCR_LOCAL_ENABLED").and_then(|v| v.parse().ok()) {
        config.ocr.local_enabled = enabled;
    }
    if let Some(val) = lookup("VEIL_OCR_TESSERACT_COMMAND") {
        config.ocr.tesseract_command = val;
    }
    if let Some(secs) = lookup("VEIL_OCR_LOCAL_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        config.ocr.local_timeout_seconds = secs;
    }
    if let Some(key) = lookup(OCR_API_KEY_ENV).or_else(|| lookup("VEIL_OCR_API_KEY")) {
        // An empty key explicitly disables the remote strategy
        config.ocr.api_key = secret_string_opt(Some(key));
    }

    // Redaction overrides
    if let Some(val) = lookup("VEIL_REDACTION_LABEL_DICTIONARY") {
        config.redaction.label_dictionary = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("VEIL_REDACTION_PATTERN_LIBRARY") {
        config.redaction.pattern_library = Some(PathBuf::from(val));
    }

    // Audit overrides
    if let Some(enabled) = lookup("VEIL_AUDIT_ENABLED").and_then(|v| v.parse().ok()) {
        config.audit.enabled = enabled;
    }
    if let Some(val) = lookup("VEIL_AUDIT_LOG_PATH") {
        config.audit.log_path = PathBuf::from(val);
    }

    // Logging overrides
    if let Some(enabled) = lookup("VEIL_LOGGING_LOCAL_ENABLED").and_then(|v| v.parse().ok()) {
        config.logging.local_enabled = enabled;
    }
    if let Some(val) = lookup("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = lookup("VEIL_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
