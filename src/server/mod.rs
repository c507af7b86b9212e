//! HTTP server
//!
//! | Method | Path              | Body            | Success                        |
//! |--------|-------------------|-----------------|--------------------------------|
//! | POST   | `/process_raw_pdf`| raw document    | `200 application/pdf`          |
//! | GET    | `/health`         | -               | `200 {"status":"healthy",...}` |
//!
//! Failures are `{"error": "<message>"}`: `422` when no text could be
//! extracted, `413` for oversized bodies, `408` when the request outlives
//! `request_timeout_seconds`, `500` otherwise.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::{RequestId, FILENAME_HEADER, REQUEST_ID_HEADER};
pub use state::AppState;

use crate::config::ServerConfig;
use crate::domain::{Result, VeilError};
use crate::pipeline::DocumentPipeline;
use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/process_raw_pdf", post(routes::process_raw_pdf))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(error::handle_layer_error))
                .timeout(Duration::from_secs(config.request_timeout_seconds)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(routes::assign_request_id))
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves
pub async fn serve<F>(config: &ServerConfig, pipeline: DocumentPipeline, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| VeilError::Io(format!("Failed to bind {address}: {e}")))?;

    tracing::info!(
        address = %address,
        max_body_bytes = config.max_body_bytes,
        "Veil listening"
    );

    axum::serve(listener, router(AppState::new(pipeline), config))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
