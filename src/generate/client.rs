//! Generation Service Client
//!
//! HTTP implementation of the generation boundary. POSTs the completed
//! selection to the service's generate endpoint and folds every
//! transport-level failure into the result's error shape, so callers
//! never observe a raw request error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{GenerationClient, GenerationResult, WizardSelection};

pub struct HttpGenerationClient {
    api_url: String,
    http: Client,
}

impl HttpGenerationClient {
    /// Create a client for the generation service at `api_url`.
    pub fn new(api_url: impl Into<String>, timeout_secs: u64) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_url, http }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.api_url)
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    /// A single attempt, no retry. Always returns a terminal result.
    async fn generate(&self, selection: &WizardSelection) -> GenerationResult {
        let url = self.endpoint();
        debug!("POST {}", url);

        let response = match self.http.post(&url).json(selection).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Generation request failed: {}", e);
                return GenerationResult::failure(format!(
                    "could not reach the generation service: {}",
                    e
                ));
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        classify_response(status, &body)
    }
}

/// Turn a raw service response into a terminal result.
///
/// An explicit error payload wins regardless of status; a non-success
/// status without one becomes a generic failure, as does a body that is
/// not JSON.
fn classify_response(status: StatusCode, body: &str) -> GenerationResult {
    let doc: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    if let Some(message) = doc["error"].as_str() {
        return GenerationResult::failure(message);
    }

    if !status.is_success() {
        return GenerationResult::failure(format!(
            "generation service returned {}",
            status.as_u16()
        ));
    }

    if doc.is_null() {
        return GenerationResult::failure("generation service returned an unreadable response");
    }

    GenerationResult {
        preview_url: doc["previewUrl"].as_str().map(|s| s.to_string()),
        download_url: doc["downloadUrl"].as_str().map(|s| s.to_string()),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationOutcome;

    #[test]
    fn test_endpoint_tolerates_a_trailing_slash() {
        let client = HttpGenerationClient::new("http://localhost:5000/", 30);
        assert_eq!(client.endpoint(), "http://localhost:5000/api/generate");
    }

    #[test]
    fn test_success_body_yields_artifact_urls() {
        let body = r#"{"success": true, "previewUrl": "/api/preview/abc", "downloadUrl": "/api/download/abc"}"#;
        let result = classify_response(StatusCode::OK, body);

        assert_eq!(result.preview_url.as_deref(), Some("/api/preview/abc"));
        assert_eq!(result.download_url.as_deref(), Some("/api/download/abc"));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_error_payload_wins_over_status() {
        let body = r#"{"error": "Missing required fields"}"#;
        let result = classify_response(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            result.outcome(),
            GenerationOutcome::Failed("Missing required fields")
        );
    }

    #[test]
    fn test_non_success_status_without_payload_is_a_failure() {
        let result = classify_response(StatusCode::BAD_GATEWAY, "");
        match result.outcome() {
            GenerationOutcome::Failed(message) => assert!(message.contains("502")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_body_is_a_failure() {
        let result = classify_response(StatusCode::OK, "<html>gateway timeout</html>");
        assert!(matches!(result.outcome(), GenerationOutcome::Failed(_)));
    }

    #[test]
    fn test_success_without_urls_is_ready_for_download() {
        let result = classify_response(StatusCode::OK, r#"{"success": true}"#);
        assert_eq!(result.outcome(), GenerationOutcome::ReadyForDownload);
    }
}
