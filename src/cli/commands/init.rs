//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        if self.output.exists() && !self.force {
            println!(
                "❌ Configuration file already exists: {}",
                self.output.display()
            );
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output.display());
                println!("  2. Put OCR_API_KEY=<key> in .env to enable remote OCR");
                println!("  3. Validate configuration: veil validate-config");
                println!("  4. Start the service: veil serve");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Sample configuration with every section at its default
pub fn sample_config() -> &'static str {
    r#"# Veil Configuration File
# PII redaction service

[application]
log_level = "info"

[server]
host = "0.0.0.0"
port = 5000
max_body_bytes = 26214400
request_timeout_seconds = 180

[ocr]
endpoint = "https://api.ocr.space/parse/image"
# Remote OCR is disabled without a key. OCR_API_KEY in the environment
# always takes precedence over this value.
# api_key = "${OCR_API_KEY}"
language = "eng"
timeout_seconds = 30
local_enabled = true
tesseract_command = "tesseract"
local_timeout_seconds = 60

[redaction]
# Built-in data is used when these are unset
# label_dictionary = "patterns/pii_labels.toml"
# pattern_library = "patterns/pii_patterns.toml"

[audit]
enabled = false
log_path = "./audit/redaction.log"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
}
