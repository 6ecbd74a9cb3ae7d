//! Typed client for the summarization proxy API.
//!
//! One-shot request/response exchanges, no streaming. Error bodies are
//! unwrapped into a single human-readable message: `details` when present,
//! else `error`, else the HTTP status line.

use crate::config::DEFAULT_API_BASE_URL;
use crate::GistifyError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Body sent to `POST /api/summarize`.
#[derive(Debug, Serialize)]
pub struct SummarizeRequest<'a> {
    pub content: &'a str,
    pub style: &'a str,
    #[serde(rename = "type")]
    pub content_type: &'a str,
}

/// Successful summarize response.
#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: String,
    pub style: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub timestamp: String,
}

/// `GET /api/health` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub gemini_configured: bool,
    pub model: String,
}

/// HTTP client for the proxy.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Client pointed at the default local proxy.
    pub fn local() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }

    /// Request a summary from the proxy.
    pub async fn summarize(
        &self,
        content: &str,
        style: &str,
        content_type: &str,
    ) -> Result<SummaryResponse, GistifyError> {
        let response = self
            .http
            .post(format!("{}/api/summarize", self.base_url))
            .json(&SummarizeRequest {
                content,
                style,
                content_type,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GistifyError::Upstream(error_message(response).await));
        }
        Ok(response.json().await?)
    }

    /// Check proxy health.
    pub async fn health(&self) -> Result<HealthResponse, GistifyError> {
        let response = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GistifyError::Upstream(
                "Server is not responding".to_string(),
            ));
        }
        Ok(response.json().await?)
    }
}

/// Best available message from a failed proxy response.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let fallback = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );

    let Ok(body) = response.text().await else {
        return fallback;
    };
    let Ok(value) = serde_json::from_str::<Value>(&body) else {
        return fallback;
    };

    value
        .get("details")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_summarize_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/summarize"))
            .and(body_partial_json(serde_json::json!({
                "content": "text", "style": "bullets", "type": "article"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "summary": "* **Topic:** detail",
                "style": "bullets",
                "type": "article",
                "timestamp": "2026-08-06T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let response = client.summarize("text", "bullets", "article").await.unwrap();
        assert!(response.success);
        assert_eq!(response.summary, "* **Topic:** detail");
    }

    #[tokio::test]
    async fn test_summarize_prefers_details_over_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "Failed to generate summary",
                "details": "API key not valid"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.summarize("c", "s", "t").await.unwrap_err();
        assert_eq!(err.to_string(), "API key not valid");
    }

    #[tokio::test]
    async fn test_summarize_uses_error_field_when_no_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Missing required fields: content, style, type"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.summarize("c", "s", "t").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: content, style, type"
        );
    }

    #[tokio::test]
    async fn test_summarize_falls_back_to_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.summarize("c", "s", "t").await.unwrap_err();
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "timestamp": "2026-08-06T12:00:00Z",
                "geminiConfigured": true,
                "model": "gemini-2.0-flash"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert!(health.gemini_configured);
    }

    #[tokio::test]
    async fn test_health_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.health().await.unwrap_err();
        assert_eq!(err.to_string(), "Server is not responding");
    }
}
