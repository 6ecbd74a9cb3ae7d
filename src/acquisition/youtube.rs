//! YouTube transcript acquisition.
//!
//! Three independent transcript sources run in a fixed order — embedded
//! player state, the public timedtext listing API, then the rendered
//! transcript panel — and the first non-empty result wins. A source that
//! fails (network error, missing data, unparseable payload) just means the
//! chain moves on; only exhausting all three is an error.

use super::http_client::HttpClient;
use super::timedtext::{
    self, fetch_track_transcript, order_english_first, order_for_listing, CaptionTrack,
};
use super::{ExtractedText, SourceKind};
use crate::GistifyError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Default host for the timedtext listing and track endpoints.
pub const DEFAULT_TIMEDTEXT_BASE: &str = "https://youtubetranscript.googleapis.com";

/// Everything a transcript source needs to run.
pub struct AcquireContext<'a> {
    pub client: &'a HttpClient,
    /// The watch/shorts/embed URL.
    pub url: &'a str,
    /// The fetched watch-page HTML (may be empty if the fetch failed).
    pub html: &'a str,
    /// Base URL for the timedtext endpoints (injectable for tests).
    pub timedtext_base: &'a str,
}

/// One candidate way of obtaining a transcript.
#[async_trait]
pub trait TranscriptSource: Sync {
    fn name(&self) -> &'static str;

    /// Produce a transcript, or `None` if this source has nothing.
    async fn produce(&self, ctx: &AcquireContext<'_>) -> Option<String>;
}

/// Run sources in order and return the first non-empty transcript.
pub async fn first_non_empty(
    sources: &[&dyn TranscriptSource],
    ctx: &AcquireContext<'_>,
) -> Option<String> {
    for source in sources {
        match source.produce(ctx).await {
            Some(text) if !text.trim().is_empty() => {
                debug!("transcript source {} succeeded", source.name());
                return Some(text);
            }
            _ => debug!("transcript source {} produced nothing", source.name()),
        }
    }
    None
}

/// Acquires transcripts for YouTube URLs.
pub struct TranscriptAcquirer {
    timedtext_base: String,
}

impl TranscriptAcquirer {
    pub fn new() -> Self {
        Self {
            timedtext_base: DEFAULT_TIMEDTEXT_BASE.to_string(),
        }
    }

    /// Override the timedtext endpoint base (used by tests).
    pub fn with_timedtext_base(base: impl Into<String>) -> Self {
        Self {
            timedtext_base: base.into(),
        }
    }

    /// Fetch the watch page and run the source chain.
    ///
    /// A failed page fetch is not fatal: the listing API only needs the
    /// video ID from the URL, so the chain still runs against empty HTML.
    pub async fn acquire(
        &self,
        client: &HttpClient,
        url: &str,
    ) -> Result<ExtractedText, GistifyError> {
        let html = match client.get_text(url).await {
            Ok(html) => html,
            Err(e) => {
                debug!("watch page fetch failed: {e}");
                String::new()
            }
        };
        self.acquire_from_html(client, url, &html).await
    }

    /// Run the source chain against already-fetched page HTML.
    pub async fn acquire_from_html(
        &self,
        client: &HttpClient,
        url: &str,
        html: &str,
    ) -> Result<ExtractedText, GistifyError> {
        let ctx = AcquireContext {
            client,
            url,
            html,
            timedtext_base: &self.timedtext_base,
        };
        let sources: [&dyn TranscriptSource; 3] = [&PlayerState, &ListingApi, &PanelScrape];

        match first_non_empty(&sources, &ctx).await {
            Some(text) => Ok(ExtractedText {
                text,
                source: SourceKind::YoutubeTranscript,
            }),
            None => Err(GistifyError::NoTranscript),
        }
    }
}

impl Default for TranscriptAcquirer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a URL points at YouTube at all.
pub fn is_youtube_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .map(|host| {
            host == "youtu.be"
                || host == "youtube.com"
                || host.ends_with(".youtube.com")
        })
        .unwrap_or(false)
}

/// Derive the video ID from a watch, short-link, shorts, or embed URL.
pub fn video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;

    if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }

    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    match parsed.host_str()? {
        "youtu.be" => segments.next().map(String::from),
        _ => match segments.next()? {
            "shorts" | "embed" => segments.next().map(String::from),
            _ => None,
        },
    }
}

/// Source 1: the player-state object embedded in the watch page.
struct PlayerState;

#[async_trait]
impl TranscriptSource for PlayerState {
    fn name(&self) -> &'static str {
        "player-state"
    }

    async fn produce(&self, ctx: &AcquireContext<'_>) -> Option<String> {
        let player = extract_player_response(ctx.html)?;
        let tracks = order_english_first(player_caption_tracks(&player));
        if tracks.is_empty() {
            return None;
        }
        for track in &tracks {
            if let Some(text) = fetch_track_transcript(ctx.client, track).await {
                return Some(text);
            }
        }
        None
    }
}

/// Source 2: the public timedtext listing API, keyed by video ID.
struct ListingApi;

#[async_trait]
impl TranscriptSource for ListingApi {
    fn name(&self) -> &'static str {
        "listing-api"
    }

    async fn produce(&self, ctx: &AcquireContext<'_>) -> Option<String> {
        let id = video_id(ctx.url)?;
        let list_url = timedtext::listing_url(ctx.timedtext_base, &id);
        let xml = ctx.client.get_text(&list_url).await.ok()?;

        let tracks = order_for_listing(timedtext::parse_track_list(
            &xml,
            &id,
            ctx.timedtext_base,
        ));
        for track in &tracks {
            if let Some(text) = fetch_track_transcript(ctx.client, track).await {
                return Some(text);
            }
        }
        None
    }
}

/// Source 3: scrape the rendered transcript panel out of the page HTML.
struct PanelScrape;

#[async_trait]
impl TranscriptSource for PanelScrape {
    fn name(&self) -> &'static str {
        "panel-scrape"
    }

    async fn produce(&self, ctx: &AcquireContext<'_>) -> Option<String> {
        scrape_transcript_panel(ctx.html)
    }
}

/// Parse `ytInitialPlayerResponse` out of inline script text.
///
/// Finds the assignment marker, then scans a balanced JSON object from the
/// opening brace (a lazy regex would stop at the first `}`, which is never
/// the end of this structure).
pub fn extract_player_response(html: &str) -> Option<Value> {
    let marker = regex::Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").ok()?;
    for m in marker.find_iter(html) {
        let start = m.end() - 1;
        if let Some(object) = balanced_json_object(&html[start..]) {
            if let Ok(value) = serde_json::from_str::<Value>(object) {
                return Some(value);
            }
        }
    }
    None
}

/// Slice the balanced `{...}` object starting at the first byte, honoring
/// string literals and escapes.
fn balanced_json_object(s: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Read caption tracks from a player-response object.
///
/// Prefers `captions.playerCaptionsTracklistRenderer.captionTracks`, falling
/// back to the older `captions.captionTracks` location.
pub fn player_caption_tracks(player: &Value) -> Vec<CaptionTrack> {
    let tracks = player
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
        .filter(|a| !a.is_empty())
        .or_else(|| {
            player
                .pointer("/captions/captionTracks")
                .and_then(Value::as_array)
        });

    let Some(tracks) = tracks else {
        return Vec::new();
    };

    tracks
        .iter()
        .filter_map(|t| {
            let location = t.get("baseUrl")?.as_str()?.to_string();
            let language_code = t
                .get("languageCode")
                .or_else(|| t.get("lang"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let display_name = track_display_name(t);
            let kind = t
                .get("kind")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Some(CaptionTrack {
                location,
                language_code,
                display_name,
                kind,
            })
        })
        .collect()
}

/// Track names come as either `{simpleText}` or `{runs: [{text}, ..]}`.
fn track_display_name(track: &Value) -> String {
    let name = track.get("name");
    if let Some(simple) = name.and_then(|n| n.get("simpleText")).and_then(Value::as_str) {
        return simple.to_string();
    }
    name.and_then(|n| n.get("runs"))
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|r| r.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Concatenate the text of rendered transcript-panel segments.
///
/// One canonical selector set: segment containers with their formatted-text
/// child, falling back to the segment's own text when the child is absent.
pub fn scrape_transcript_panel(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let segment_sel = Selector::parse("ytd-transcript-segment-renderer").ok()?;
    let text_sel = Selector::parse("yt-formatted-string.segment-text").ok()?;

    let mut pieces = Vec::new();
    for segment in document.select(&segment_sel) {
        let text = match segment.select(&text_sel).next() {
            Some(el) => el.text().collect::<String>(),
            None => segment.text().collect::<String>(),
        };
        let trimmed = text.trim().to_string();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    if pieces.is_empty() {
        None
    } else {
        Some(pieces.join(" "))
    }
}
