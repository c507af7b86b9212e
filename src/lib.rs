// Veil - PII redaction service
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - PII redaction service
//!
//! Veil accepts a document (plain text, `.docx`, PDF or a scanned image),
//! extracts its text, masks personally identifiable information with
//! `█` runs of equal length, and returns the result as a freshly typeset PDF.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP surface (`POST /process_raw_pdf`, `GET /health`)
//! - [`pipeline`] - Extract, redact, render, audit
//! - [`redaction`] - Label dictionary, pattern library and the redaction engine
//! - [`adapters`] - Text extraction strategies and the PDF renderer
//! - [`domain`] - Document model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veil::config::VeilConfig;
//! use veil::domain::RawDocument;
//! use veil::pipeline::DocumentPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = DocumentPipeline::from_config(&VeilConfig::default())?;
//!
//!     let doc = RawDocument::new(b"SSN: 123-45-6789".to_vec(), "intake.txt");
//!     let processed = pipeline.process(doc).await?;
//!
//!     std::fs::write("processed.pdf", &processed.pdf)?;
//!     println!("{}", processed.report);
//!     Ok(())
//! }
//! ```
//!
//! ## Redaction Only
//!
//! The engine is pure and synchronous:
//!
//! ```rust
//! use veil::redaction::RedactionEngine;
//!
//! let engine = RedactionEngine::with_defaults().unwrap();
//! assert_eq!(engine.redact("Ref: 1234567"), "Ref: ███████");
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::VeilError`]. At the HTTP boundary an
//! empty extraction becomes `422`; everything else becomes `500`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod pipeline;
pub mod redaction;
pub mod server;
