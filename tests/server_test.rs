//! Integration tests for the HTTP surface
//!
//! Requests are driven through the router in-process with
//! `tower::ServiceExt::oneshot`; no socket is opened.

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;
use veil::config::{ServerConfig, VeilConfig};
use veil::pipeline::DocumentPipeline;
use veil::server::{self, AppState, FILENAME_HEADER, REQUEST_ID_HEADER};

fn app_with_limit(max_body_bytes: usize) -> Router {
    let mut config = VeilConfig::default();
    config.ocr.local_enabled = false;
    let pipeline = DocumentPipeline::from_config(&config).unwrap();

    let server_config = ServerConfig {
        max_body_bytes,
        ..ServerConfig::default()
    };
    server::router(AppState::new(pipeline), &server_config)
}

fn app() -> Router {
    app_with_limit(ServerConfig::default().max_body_bytes)
}

fn upload(body: impl Into<Body>, filename: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/process_raw_pdf");
    if let Some(name) = filename {
        builder = builder.header(FILENAME_HEADER, name);
    }
    builder.body(body.into()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_text_upload_returns_pdf() {
    let response = app()
        .oneshot(upload(
            "Social Security Number: 123-45-6789\nName: Alice",
            Some("intake.txt"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"processed.pdf\""
    );
    let request_id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    assert!(Uuid::parse_str(&request_id).is_ok());

    let pdf = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    // Masked digits must not survive into the content stream
    assert!(!pdf.windows(11).any(|w| w == b"123-45-6789"));
}

#[tokio::test]
async fn test_blank_document_is_unprocessable() {
    let response = app()
        .oneshot(upload("   \n\t", Some("blank.txt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"error": "Could not extract text"}));
}

#[tokio::test]
async fn test_malformed_docx_is_server_error() {
    let response = app()
        .oneshot(upload("definitely not a zip", Some("form.docx")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Malformed document"));
}

#[tokio::test]
async fn test_missing_filename_defaults_to_pdf() {
    // Not a PDF and no OCR configured: nothing can be recovered
    let response = app()
        .oneshot(upload("Name: Alice", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let body = vec![b'a'; 2048];
    let request = Request::builder()
        .method(Method::POST)
        .uri("/process_raw_pdf")
        .header(FILENAME_HEADER, "big.txt")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let response = app_with_limit(1024).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("length limit exceeded"));
}

#[tokio::test]
async fn test_oversized_body_without_length_rejected() {
    let request = upload(vec![b'a'; 64], Some("big.txt"));

    let response = app_with_limit(16).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_ascii_filename_keeps_extension() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/process_raw_pdf")
        .header(
            FILENAME_HEADER,
            HeaderValue::from_bytes("résumé.txt".as_bytes()).unwrap(),
        )
        .body(Body::from("Social Security Number: 123-45-6789"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let pdf = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_request_ids_are_unique() {
    let app = app();
    let first = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_ne!(
        first.headers()[REQUEST_ID_HEADER],
        second.headers()[REQUEST_ID_HEADER]
    );
}

#[tokio::test]
async fn test_wrong_method() {
    let response = app()
        .oneshot(Request::get("/process_raw_pdf").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
