//! HTTP error mapping

use crate::domain::{ExtractionError, VeilError};
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde::{Deserialize, Serialize};

/// Error response body: `{"error": "<message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned by handlers and middleware
#[derive(Debug)]
pub enum ApiError {
    /// The pipeline failed
    Pipeline(VeilError),
    /// The request was refused before reaching the pipeline
    Rejected { status: StatusCode, message: String },
}

impl From<VeilError> for ApiError {
    fn from(err: VeilError) -> Self {
        Self::Pipeline(err)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    /// Status code and client-facing message
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Pipeline(VeilError::Extraction(ExtractionError::Empty)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ExtractionError::Empty.to_string(),
            ),
            Self::Pipeline(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            Self::Rejected { status, message } => (*status, message.clone()),
        }
    }
}

/// Maps errors raised by the service stack (request timeout) to a JSON body
pub async fn handle_layer_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Rejected {
            status: StatusCode::REQUEST_TIMEOUT,
            message: "Request timed out".to_string(),
        }
    } else {
        tracing::error!(error = %err, "Unhandled service error");
        ApiError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RenderError;

    #[test]
    fn test_empty_extraction_is_422() {
        let err = ApiError::from(VeilError::Extraction(ExtractionError::Empty));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(message, "Could not extract text");
    }

    #[test]
    fn test_malformed_document_is_500() {
        let err = ApiError::from(VeilError::Extraction(ExtractionError::Malformed(
            "missing word/document.xml".to_string(),
        )));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("missing word/document.xml"));
    }

    #[test]
    fn test_render_failure_is_500() {
        let err = ApiError::from(VeilError::Render(RenderError::PdfWrite("disk".to_string())));
        assert_eq!(err.status_and_message().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_elapsed_timeout_is_408() {
        let err = handle_layer_error(Box::new(tower::timeout::error::Elapsed::new())).await;
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(message, "Request timed out");
    }

    #[tokio::test]
    async fn test_other_layer_error_is_500() {
        let err = handle_layer_error("connection reset".into()).await;
        assert_eq!(
            err.status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, "connection reset".to_string())
        );
    }
}
