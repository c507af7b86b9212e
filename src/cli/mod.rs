//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Veil using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Exit code: success
pub const EXIT_OK: i32 = 0;
/// Exit code: configuration error
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: no text could be extracted from the input
pub const EXIT_NO_TEXT: i32 = 3;
/// Exit code: fatal error
pub const EXIT_FATAL: i32 = 5;

/// Veil - PII redaction for scanned, PDF, text and word-processor documents
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version, about, long_about = None)]
#[command(author = "Veil Contributors")]
pub struct Cli {
    /// Path to configuration file (optional for serve and redact)
    #[arg(short, long, default_value = "veil.toml", env = "VEIL_CONFIG")]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP redaction service
    Serve(commands::serve::ServeArgs),

    /// Redact a single local file
    Redact(commands::redact::RedactArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
