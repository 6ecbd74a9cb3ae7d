//! Summarization proxy server.
//!
//! A two-route axum app: `POST /api/summarize` and `GET /api/health`, with
//! a JSON 404 for everything else. Request bodies are capped at 10 MB and
//! CORS is wide open — the proxy only ever runs on localhost for its own
//! clients.

pub mod handlers;
pub mod rate_limit;

use crate::config::ServerConfig;
use crate::provider::GeminiClient;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use rate_limit::{FixedWindowLimiter, RateLimit};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Maximum accepted request body size.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared state behind the router.
pub struct AppState {
    pub config: ServerConfig,
    pub limiter: Arc<dyn RateLimit>,
    /// Present only when an API key is configured.
    pub gemini: Option<GeminiClient>,
}

impl AppState {
    /// Build state with the default fixed-window limiter.
    pub fn new(config: ServerConfig) -> Self {
        let limiter = Arc::new(FixedWindowLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window,
        ));
        Self::with_limiter(config, limiter)
    }

    /// Build state with an injected limiter implementation.
    pub fn with_limiter(config: ServerConfig, limiter: Arc<dyn RateLimit>) -> Self {
        let gemini = config.api_key.as_ref().map(|key| {
            GeminiClient::new(config.gemini_base.clone(), config.model.clone(), key.clone())
        });
        Self {
            config,
            limiter,
            gemini,
        }
    }
}

/// Build the proxy router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(handlers::summarize))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process exits.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let port = config.port;
    let key_configured = config.api_key.is_some();
    let model = config.model.clone();

    let app = router(AppState::new(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("gistify proxy listening on port {port}");
    info!("health check: http://localhost:{port}/api/health");
    info!("gemini configured: {key_configured}, model: {model}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
