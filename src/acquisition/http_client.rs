//! Thin HTTP client for page and caption fetches.
//!
//! One shared `reqwest` client with a browser-ish user agent (YouTube
//! serves stripped-down markup to unknown agents). Fetch failures are
//! plain `reqwest` errors; callers decide whether a failure is fatal or
//! just means "try the next candidate."

use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Shared HTTP client for acquisition fetches.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { inner }
    }

    /// GET a URL and return its body as text. Non-2xx statuses are errors.
    pub async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        self.inner
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
