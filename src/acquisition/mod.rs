//! Content acquisition: full pages, caller-provided selections, and
//! YouTube transcripts.
//!
//! Each source produces an [`ExtractedText`] tagged with where it came
//! from; the summarize flow feeds that text to the proxy unchanged.

pub mod http_client;
pub mod page;
pub mod timedtext;
pub mod youtube;

use serde::Serialize;

/// Where a piece of extracted text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Page,
    Selection,
    YoutubeTranscript,
}

impl SourceKind {
    /// Default content-type label sent with a summarize request.
    pub fn default_content_type(&self) -> &'static str {
        match self {
            SourceKind::YoutubeTranscript => "video",
            SourceKind::Page | SourceKind::Selection => "article",
        }
    }
}

/// Text ready to be summarized, tagged with its source.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub source: SourceKind,
}

/// Wrap caller-provided selection text, rejecting empty input.
pub fn from_selection(text: &str) -> Result<ExtractedText, crate::GistifyError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(crate::GistifyError::NoSelection);
    }
    Ok(ExtractedText {
        text: trimmed.to_string(),
        source: SourceKind::Selection,
    })
}
