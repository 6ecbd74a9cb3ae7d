//! Error taxonomy shared across acquisition, the proxy, and the CLI.

use thiserror::Error;

/// All failure modes surfaced to callers.
///
/// The display strings double as the user-facing messages the CLI prints and
/// the `error`/`details` fields the proxy returns, so they are worded for
/// humans rather than for logs.
#[derive(Debug, Error)]
pub enum GistifyError {
    /// A required request field was absent or empty.
    #[error("Missing required fields: content, style, type")]
    MissingFields,

    /// The proxy has no upstream credential configured.
    #[error("Gemini API key not configured")]
    ApiKeyMissing,

    /// The upstream generative-AI call failed; carries the upstream message
    /// when one was available, else a generic fallback.
    #[error("{0}")]
    Upstream(String),

    /// The client exceeded the fixed-window request budget.
    #[error("Too many requests. Please try again later.")]
    RateLimited {
        /// Whole seconds until the current window resets.
        retry_after: u64,
    },

    /// No selection text was provided.
    #[error("No text selected")]
    NoSelection,

    /// Every transcript source came up empty.
    #[error("No transcript found for this video")]
    NoTranscript,

    /// The page yielded no usable text.
    #[error("Unable to extract content from page")]
    NoContent,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
