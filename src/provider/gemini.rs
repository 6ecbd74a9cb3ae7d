//! Gemini API client and wire types.
//!
//! One non-streaming `generateContent` call per summarize request. The
//! response's first candidate has its text parts concatenated; everything
//! else (safety ratings, usage metadata) is ignored.

use crate::GistifyError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// A content part. Only text parts are sent; non-text parts in responses
/// deserialize with `text: None` and are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Content in a request or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// `generateContent` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn first_candidate_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini API client.
pub struct GeminiClient {
    http: reqwest::Client,
    base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for `{base}/{model}:generateContent`.
    pub fn new(base: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base: base.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Issue one `generateContent` call and return the generated text.
    ///
    /// Non-success responses surface the upstream error message when the
    /// body carries one, else a generic fallback.
    pub async fn generate(&self, prompt: &str) -> Result<String, GistifyError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base,
            self.model,
            urlencode(&self.api_key)
        );

        debug!("gemini generateContent: model={}", self.model);

        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GistifyError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GistifyError::Upstream(e.to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&body)
                .unwrap_or_else(|| "Gemini API error".to_string());
            return Err(GistifyError::Upstream(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GistifyError::Upstream(format!("failed to parse response: {e}")))?;
        Ok(parsed.first_candidate_text())
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// Prefers `error.message`, then a top-level `message`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
}

fn urlencode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_first_candidate_text_concatenates_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [
                    {"text": "Hello "},
                    {"functionCall": {"name": "x"}},
                    {"text": "world"}
                ]}},
                {"content": {"parts": [{"text": "ignored second candidate"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.first_candidate_text(), "Hello world");
    }

    #[test]
    fn test_first_candidate_text_empty_response() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(parsed.first_candidate_text(), "");
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.first_candidate_text(), "");
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error": {"code": 400, "message": "API key not valid"}}"#)
                .as_deref(),
            Some("API key not valid")
        );
        assert_eq!(
            extract_error_message(r#"{"message": "top level"}"#).as_deref(),
            Some("top level")
        );
        assert!(extract_error_message("<html>502</html>").is_none());
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::from_prompt("summarize this");
        assert_json_diff::assert_json_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "contents": [{"parts": [{"text": "summarize this"}]}]
            })
        );
    }

    #[tokio::test]
    async fn test_generate_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gemini-2.0-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "the prompt"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "the summary"}]}}]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), "gemini-2.0-flash", "test-key");
        assert_eq!(client.generate("the prompt").await.unwrap(), "the summary");
    }

    #[tokio::test]
    async fn test_generate_surfaces_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), "gemini-2.0-flash", "bad-key");
        let err = client.generate("p").await.unwrap_err();
        assert_eq!(err.to_string(), "API key not valid");
    }

    #[tokio::test]
    async fn test_generate_generic_fallback_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), "gemini-2.0-flash", "key");
        let err = client.generate("p").await.unwrap_err();
        assert_eq!(err.to_string(), "Gemini API error");
    }
}
