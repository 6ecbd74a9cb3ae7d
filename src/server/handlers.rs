//! Request handlers for the proxy routes.

use super::AppState;
use crate::provider::build_prompt;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// `POST /api/summarize` request body. Missing fields deserialize to empty
/// strings and are rejected by validation, matching "absent or empty".
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub style: String,
    #[serde(default, rename = "type")]
    pub content_type: String,
}

/// Successful summarize response.
#[derive(Debug, Serialize)]
pub struct SummarizeOk {
    pub success: bool,
    pub summary: String,
    pub style: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub timestamp: String,
}

/// Structured error body shared by all failure responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorBody {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            details: None,
            retry_after: None,
        }
    }
}

/// `GET /api/health` response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBody {
    pub status: String,
    pub timestamp: String,
    pub gemini_configured: bool,
    pub model: String,
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<SummarizeRequest>,
) -> Response {
    if let Err(retry_after) = state.limiter.check(&addr.ip().to_string()) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorBody {
                error: "Too many requests. Please try again later.".to_string(),
                details: None,
                retry_after: Some(retry_after),
            }),
        )
            .into_response();
    }

    if request.content.is_empty() || request.style.is_empty() || request.content_type.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Missing required fields: content, style, type")),
        )
            .into_response();
    }

    let Some(gemini) = &state.gemini else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new("Gemini API key not configured")),
        )
            .into_response();
    };

    let prompt = build_prompt(&request.style, &request.content_type, &request.content);
    info!(
        "summarize: style={}, type={}, content_chars={}",
        request.style,
        request.content_type,
        request.content.chars().count()
    );

    match gemini.generate(&prompt).await {
        Ok(summary) => Json(SummarizeOk {
            success: true,
            summary,
            style: request.style,
            content_type: request.content_type,
            timestamp: Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(e) => {
            error!("summarization failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to generate summary".to_string(),
                    details: Some(e.to_string()),
                    retry_after: None,
                }),
            )
                .into_response()
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        gemini_configured: state.config.api_key.is_some(),
        model: state.config.model.clone(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Endpoint not found")),
    )
        .into_response()
}
