//! Full-page content acquisition.

use super::http_client::HttpClient;
use super::{ExtractedText, SourceKind};
use crate::extraction;
use crate::GistifyError;
use tracing::debug;

/// Fetch a page and extract its main text content.
///
/// Returns [`GistifyError::NoContent`] when the page yields no usable text
/// after boilerplate removal.
pub async fn fetch_page_text(
    client: &HttpClient,
    url: &str,
) -> Result<ExtractedText, GistifyError> {
    let html = client.get_text(url).await?;
    debug!("fetched {url}: {} bytes", html.len());

    let text = extraction::extract_content(&html);
    if text.is_empty() {
        return Err(GistifyError::NoContent);
    }

    Ok(ExtractedText {
        text,
        source: SourceKind::Page,
    })
}
