//! Serve command implementation

use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config_or_default, VeilConfig};
use crate::pipeline::DocumentPipeline;
use crate::server;
use clap::Args;
use std::path::Path;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config_path: &Path) -> anyhow::Result<i32> {
        let config = match load_config_or_default(Some(config_path)) {
            Ok(config) => self.apply(config),
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let pipeline = DocumentPipeline::from_config(&config)?;

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            remote_ocr = config.ocr.has_api_key(),
            local_ocr = config.ocr.local_enabled,
            "Starting Veil"
        );

        server::serve(&config.server, pipeline, server::shutdown_signal()).await?;
        Ok(EXIT_OK)
    }

    fn apply(&self, mut config: VeilConfig) -> VeilConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        config
    }
}
