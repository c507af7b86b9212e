//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests in this binary.

use secrecy::ExposeSecret;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use veil::config::{load_config, load_config_or_default, OCR_API_KEY_ENV};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var(OCR_API_KEY_ENV);
    std::env::remove_var("VEIL_OCR_API_KEY");
    std::env::remove_var("VEIL_SERVER_PORT");
    std::env::remove_var("VEIL_APPLICATION_LOG_LEVEL");
    std::env::remove_var("VEIL_AUDIT_ENABLED");
    std::env::remove_var("TEST_VEIL_OCR_KEY");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file(
        r#"
[application]
log_level = "debug"

[server]
host = "127.0.0.1"
port = 8443
max_body_bytes = 1048576
request_timeout_seconds = 60

[ocr]
endpoint = "https://ocr.internal.example/parse/image"
api_key = "file-key"
language = "deu"
timeout_seconds = 15
local_enabled = false
tesseract_command = "/usr/local/bin/tesseract"
local_timeout_seconds = 20

[audit]
enabled = true
log_path = "/tmp/veil-audit.log"

[logging]
local_enabled = true
local_path = "/tmp/veil-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.server.bind_address(), "127.0.0.1:8443");
    assert_eq!(config.server.max_body_bytes, 1_048_576);
    assert_eq!(config.server.request_timeout_seconds, 60);
    assert_eq!(config.ocr.language, "deu");
    assert_eq!(config.ocr.timeout_seconds, 15);
    assert!(!config.ocr.local_enabled);
    assert!(config.ocr.has_api_key());
    assert_eq!(
        config.ocr.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "file-key"
    );
    assert!(config.audit.enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_ocr_api_key_env_wins_over_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var(OCR_API_KEY_ENV, "env-key");
    std::env::set_var("VEIL_OCR_API_KEY", "prefixed-key");

    let file = config_file("[ocr]\napi_key = \"file-key\"\n");
    let config = load_config(file.path()).unwrap();

    cleanup_env_vars();
    assert_eq!(
        config.ocr.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "env-key"
    );
}

#[test]
fn test_empty_api_key_disables_remote_ocr() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var(OCR_API_KEY_ENV, "");

    let file = config_file("[ocr]\napi_key = \"file-key\"\n");
    let config = load_config(file.path()).unwrap();

    cleanup_env_vars();
    assert!(!config.ocr.has_api_key());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_VEIL_OCR_KEY", "substituted-key");

    let file = config_file("[ocr]\napi_key = \"${TEST_VEIL_OCR_KEY}\"\n");
    let config = load_config(file.path()).unwrap();

    cleanup_env_vars();
    assert_eq!(
        config.ocr.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "substituted-key"
    );
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[ocr]\napi_key = \"${TEST_VEIL_OCR_KEY}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_VEIL_OCR_KEY"));
}

#[test]
fn test_prefixed_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("VEIL_SERVER_PORT", "9090");
    std::env::set_var("VEIL_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("VEIL_AUDIT_ENABLED", "not-a-bool");

    let file = config_file("[server]\nport = 7000\n");
    let config = load_config(file.path()).unwrap();

    cleanup_env_vars();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.application.log_level, "warn");
    // Unparseable overrides keep the file value
    assert!(!config.audit.enabled);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config_or_default(Some(Path::new("/nonexistent/veil.toml"))).unwrap();
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.max_body_bytes, 25 * 1024 * 1024);
    assert!(!config.ocr.has_api_key());

    assert!(load_config("/nonexistent/veil.toml").is_err());
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"verbose\"\n",
        "[ocr]\nendpoint = \"ftp://ocr.example.com\"\n",
        "[ocr]\ntimeout_seconds = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[redaction]\nlabel_dictionary = \"/nonexistent/labels.toml\"\n",
    ] {
        let file = config_file(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("validation failed"),
            "expected validation failure for {contents:?}, got {err}"
        );
    }
}

#[test]
fn test_malformed_toml_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[server\nport = 1\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_custom_redaction_files() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let labels = dir.path().join("labels.toml");
    std::fs::write(
        &labels,
        "[[labels]]\ncategory = \"MEDICAL_RECORD_NUMBER\"\nsurface_forms = [\"MRN\"]\n",
    )
    .unwrap();
    let file = config_file(&format!(
        "[redaction]\nlabel_dictionary = \"{}\"\n",
        labels.display()
    ));

    let config = load_config(file.path()).unwrap();
    let engine = veil::redaction::engine_from_config(&config.redaction).unwrap();
    assert_eq!(engine.dictionary().len(), 1);
    assert_eq!(engine.redact("MRN: A-55"), "MRN: ████");
}
