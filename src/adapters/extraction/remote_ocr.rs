//! Remote OCR strategy (OCR.space compatible API)
//!
//! Sends the document as multipart form data with fields `file`, `apikey`
//! and `language`, and joins `ParsedResults[].ParsedText` with `\n`.

use super::ExtractionStrategy;
use crate::config::{OcrConfig, SecretString};
use crate::domain::{DocumentKind, ExtractionError, RawDocument, Result, StrategyKind, VeilError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

/// Response body of the OCR API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrResponse {
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(default)]
    is_errored_on_processing: bool,
    /// String or array of strings depending on the failure
    #[serde(default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

/// Remote OCR over HTTP
pub struct RemoteOcrStrategy {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    language: String,
    timeout_seconds: u64,
}

impl RemoteOcrStrategy {
    /// Build the strategy and its HTTP client from OCR settings
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| VeilError::Configuration(format!("Failed to build OCR client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_ref())
            .filter(|key| !key.trim().is_empty())
    }

    fn map_send_error(&self, err: reqwest::Error) -> ExtractionError {
        if err.is_timeout() {
            ExtractionError::Timeout(self.timeout_seconds)
        } else {
            ExtractionError::Upstream(format!("request failed: {err}"))
        }
    }
}

#[async_trait]
impl ExtractionStrategy for RemoteOcrStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RemoteOcr
    }

    fn applies_to(&self, kind: DocumentKind) -> bool {
        matches!(
            kind,
            DocumentKind::Pdf | DocumentKind::Image | DocumentKind::Unknown
        )
    }

    async fn extract(
        &self,
        document: &RawDocument,
    ) -> std::result::Result<String, ExtractionError> {
        let api_key = self
            .api_key()
            .ok_or_else(|| ExtractionError::NotApplicable("no API key configured".to_string()))?;

        let file = Part::bytes(document.bytes().to_vec())
            .file_name(document.declared_filename().to_string());
        let form = Form::new()
            .part("file", file)
            .text("apikey", api_key.to_string())
            .text("language", self.language.clone());

        tracing::debug!(
            endpoint = %self.endpoint,
            size_bytes = document.len(),
            "Sending document to remote OCR"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Upstream(format!("OCR service returned {status}")));
        }

        let body: OcrResponse = response
            .json()
            .await
            .map_err(|e| self.map_send_error(e))?;

        text_from_response(body)
    }
}

fn text_from_response(body: OcrResponse) -> std::result::Result<String, ExtractionError> {
    if body.is_errored_on_processing {
        let message = match body.error_message {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            _ => "IsErroredOnProcessing".to_string(),
        };
        return Err(ExtractionError::Upstream(message));
    }

    Ok(body
        .parsed_results
        .into_iter()
        .map(|r| r.parsed_text)
        .collect::<Vec<_>>()
        .join("\n"))
}
