//! Acquire content and request a summary.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::youtube::{is_youtube_url, TranscriptAcquirer};
use crate::acquisition::{self, page, ExtractedText};
use crate::cli::output::{self, Styled};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::history::{HistoryStore, SummaryRecord};
use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// URL of the page or YouTube video to summarize.
    pub url: Option<String>,

    /// Summary style: tldr, bullets, or friendly.
    #[arg(long, default_value = "tldr")]
    pub style: String,

    /// Content-type label embedded in the prompt (defaults per source:
    /// "article" for pages and selections, "video" for transcripts).
    #[arg(long = "type")]
    pub content_type: Option<String>,

    /// Summarize this text instead of fetching the URL.
    #[arg(long)]
    pub text: Option<String>,

    /// Do not record the result in history.
    #[arg(long)]
    pub no_save: bool,
}

pub async fn run(args: SummarizeArgs) -> Result<()> {
    let s = Styled::new();

    let extracted = match acquire(&args).await {
        Ok(extracted) => extracted,
        Err(e) => {
            output::print_error(&s, &e.to_string());
            std::process::exit(1);
        }
    };

    let content_type = args
        .content_type
        .clone()
        .unwrap_or_else(|| extracted.source.default_content_type().to_string());

    let api = ApiClient::new(ClientConfig::from_env().api_base_url);
    let response = match api
        .summarize(&extracted.text, &args.style, &content_type)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            output::print_error(&s, &e.to_string());
            std::process::exit(1);
        }
    };

    println!("{}", output::render_summary(&response.summary, &s));

    if !args.no_save {
        let record = SummaryRecord {
            id: Utc::now().timestamp_millis(),
            content: response.summary,
            style: response.style,
            content_type,
            timestamp: response.timestamp,
            source_url: args.url.clone().unwrap_or_default(),
        };
        HistoryStore::default_store().append(record)?;
    }

    Ok(())
}

/// Resolve the requested source: explicit text beats the URL; YouTube URLs
/// go through the transcript acquirer, everything else through page
/// extraction.
async fn acquire(args: &SummarizeArgs) -> Result<ExtractedText, anyhow::Error> {
    if let Some(text) = &args.text {
        return Ok(acquisition::from_selection(text)?);
    }

    let Some(url) = &args.url else {
        bail!("provide a URL or --text");
    };

    let client = HttpClient::new();
    if is_youtube_url(url) {
        Ok(TranscriptAcquirer::new().acquire(&client, url).await?)
    } else {
        Ok(page::fetch_page_text(&client, url).await?)
    }
}
