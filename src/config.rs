//! Environment-driven configuration for the proxy server and the CLI client.

use std::time::Duration;

/// Default Gemini REST endpoint base (models collection).
pub const DEFAULT_GEMINI_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default listening port for the proxy.
pub const DEFAULT_PORT: u16 = 3001;

/// Default fixed-window request budget per client address.
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Default fixed-window duration (15 minutes).
pub const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 900_000;

/// Default proxy base URL used by the CLI client.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Proxy server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Upstream API key. The server starts without one but refuses to
    /// summarize until it is set.
    pub api_key: Option<String>,
    /// Gemini endpoint base URL.
    pub gemini_base: String,
    /// Model name appended to the endpoint base.
    pub model: String,
    /// Listening port.
    pub port: u16,
    /// Requests allowed per client address per window.
    pub rate_limit_max_requests: u32,
    /// Fixed-window duration.
    pub rate_limit_window: Duration,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            gemini_base: env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_BASE.to_string()),
            model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL.to_string()),
            port: env_parsed("PORT", DEFAULT_PORT),
            rate_limit_max_requests: env_parsed(
                "RATE_LIMIT_MAX_REQUESTS",
                DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            ),
            rate_limit_window: Duration::from_millis(env_parsed(
                "RATE_LIMIT_WINDOW_MS",
                DEFAULT_RATE_LIMIT_WINDOW_MS,
            )),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gemini_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            port: DEFAULT_PORT,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window: Duration::from_millis(DEFAULT_RATE_LIMIT_WINDOW_MS),
        }
    }
}

/// CLI client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the summarization proxy.
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env_or("GISTIFY_API_URL", DEFAULT_API_BASE_URL.to_string()),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
