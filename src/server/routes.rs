//! Route handlers

use super::error::ApiError;
use super::state::AppState;
use crate::domain::RawDocument;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Header carrying the caller's original filename
pub const FILENAME_HEADER: &str = "x-filename";

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Download name of every processed document
pub const OUTPUT_FILENAME: &str = "processed.pdf";

/// Per-request id, inserted by [`assign_request_id`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /process_raw_pdf`
///
/// The body is the raw document; `X-Filename` selects the extraction chain.
/// Body rejections (over the size limit) come back as JSON errors.
pub async fn process_raw_pdf(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body?;
    let filename = declared_filename(&headers);
    let document = RawDocument::new(body.to_vec(), filename);

    let processed = state
        .pipeline()
        .process_with_id(document, request_id)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{OUTPUT_FILENAME}\""),
            ),
        ],
        processed.pdf,
    )
        .into_response())
}

/// `X-Filename` decoded as UTF-8 (lossily), or the default when absent or blank
fn declared_filename(headers: &HeaderMap) -> String {
    headers
        .get(FILENAME_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| RawDocument::DEFAULT_FILENAME.to_string())
}

/// Middleware: give every request a fresh id and echo it in `X-Request-Id`
pub async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    request.extensions_mut().insert(RequestId(request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
