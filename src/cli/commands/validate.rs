//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Veil configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, VeilConfig};
use crate::redaction::engine_from_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &Path) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path.display(), "Validating configuration");

        println!(
            "🔍 Validating configuration file: {}",
            config_path.display()
        );
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        // Custom label or pattern files must also compile
        let engine = match engine_from_config(&config.redaction) {
            Ok(engine) => engine,
            Err(e) => {
                println!("❌ Redaction data failed to load");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary(&config, engine.dictionary().len(), engine.library().len()) {
            println!("{line}");
        }
        println!();
        Ok(EXIT_OK)
    }
}

/// Human-readable configuration summary; never includes secret values
fn summary(config: &VeilConfig, labels: usize, patterns: usize) -> Vec<String> {
    let source = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    };

    vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Bind Address: {}", config.server.bind_address()),
        format!("  Max Body Bytes: {}", config.server.max_body_bytes),
        format!(
            "  Request Timeout: {}s",
            config.server.request_timeout_seconds
        ),
        format!("  OCR Endpoint: {}", config.ocr.endpoint),
        format!(
            "  Remote OCR: {}",
            if config.ocr.has_api_key() {
                "enabled (API key set)"
            } else {
                "disabled (no API key)"
            }
        ),
        format!(
            "  Local OCR: {}",
            if config.ocr.local_enabled {
                config.ocr.tesseract_command.as_str()
            } else {
                "disabled"
            }
        ),
        format!(
            "  Label Dictionary: {} ({labels} labels)",
            source(&config.redaction.label_dictionary)
        ),
        format!(
            "  Pattern Library: {} ({patterns} patterns)",
            source(&config.redaction.pattern_library)
        ),
        format!(
            "  Audit Trail: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        ),
    ]
}
