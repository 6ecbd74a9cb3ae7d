//! Caption-track formats: the timedtext listing XML, the `json3`
//! structured-segment format, and the timed-text XML format.
//!
//! Both transcript sources (player state and listing API) funnel their
//! candidate tracks through [`fetch_track_transcript`], which tries the
//! structured format first and falls back to XML.

use super::http_client::HttpClient;
use serde::Deserialize;
use tracing::debug;

/// A candidate caption track, ephemeral to the transcript acquirer.
///
/// `location` is the track fetch URL without a format parameter; the
/// fetcher appends `fmt=json3` for the structured attempt and leaves it
/// bare for the XML fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub location: String,
    pub language_code: String,
    pub display_name: String,
    /// `""` for manual tracks, `"asr"` for auto-generated ones.
    pub kind: String,
}

impl CaptionTrack {
    pub fn is_english(&self) -> bool {
        self.language_code.starts_with("en")
    }

    pub fn is_auto_generated(&self) -> bool {
        self.kind == "asr"
    }
}

/// Order tracks English-first, preserving relative order within each group.
///
/// Used for player-state tracks, where the page order already reflects the
/// uploader's preference.
pub fn order_english_first(mut tracks: Vec<CaptionTrack>) -> Vec<CaptionTrack> {
    tracks.sort_by_key(|t| !t.is_english());
    tracks
}

/// Order tracks English-first, then manual before auto-generated.
///
/// Used for listing-API tracks, which carry no meaningful page order.
pub fn order_for_listing(mut tracks: Vec<CaptionTrack>) -> Vec<CaptionTrack> {
    tracks.sort_by_key(|t| (!t.is_english(), t.is_auto_generated()));
    tracks
}

/// Parse the `?type=list` response into candidate tracks.
///
/// Each `<track lang_code=".." name=".." kind=".."/>` becomes a track whose
/// location is built against `timedtext_base` for the given video.
pub fn parse_track_list(xml: &str, video_id: &str, timedtext_base: &str) -> Vec<CaptionTrack> {
    let mut tracks = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(ref e))
            | Ok(quick_xml::events::Event::Start(ref e)) => {
                if e.name().as_ref() != b"track" {
                    buf.clear();
                    continue;
                }
                let mut lang = String::new();
                let mut name = String::new();
                let mut kind = String::new();
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().unwrap_or_default().to_string();
                    match attr.key.as_ref() {
                        b"lang_code" => lang = value,
                        b"name" => name = value,
                        b"kind" => kind = value,
                        _ => {}
                    }
                }
                if !lang.is_empty() {
                    let location = listing_track_url(timedtext_base, video_id, &lang, &name, &kind);
                    tracks.push(CaptionTrack {
                        location,
                        language_code: lang,
                        display_name: name,
                        kind,
                    });
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    tracks
}

/// The `?type=list` URL for a video.
pub fn listing_url(timedtext_base: &str, video_id: &str) -> String {
    format!("{timedtext_base}/api/timedtext?type=list&v={video_id}")
}

fn listing_track_url(
    timedtext_base: &str,
    video_id: &str,
    lang: &str,
    name: &str,
    kind: &str,
) -> String {
    let mut url = format!("{timedtext_base}/api/timedtext?v={video_id}");
    {
        let mut push = |key: &str, value: &str| {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
        };
        push("lang", lang);
        if !name.is_empty() {
            push("name", name);
        }
        if !kind.is_empty() {
            push("kind", kind);
        }
    }
    url
}

/// Fetch a track, trying `json3` first and the XML format second.
///
/// Any fetch or parse failure means "this track failed" — the caller moves
/// on to the next candidate. No retries.
pub async fn fetch_track_transcript(client: &HttpClient, track: &CaptionTrack) -> Option<String> {
    let json_url = append_format(&track.location, "json3");
    match client.get_text(&json_url).await {
        Ok(body) => {
            if let Some(text) = parse_json3(&body) {
                return Some(text);
            }
        }
        Err(e) => debug!("json3 fetch failed for {}: {e}", track.language_code),
    }

    match client.get_text(&track.location).await {
        Ok(body) => parse_timedtext_xml(&body),
        Err(e) => {
            debug!("xml fetch failed for {}: {e}", track.language_code);
            None
        }
    }
}

fn append_format(location: &str, fmt: &str) -> String {
    let sep = if location.contains('?') { '&' } else { '?' };
    format!("{location}{sep}fmt={fmt}")
}

#[derive(Deserialize)]
struct Json3Body {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse the `json3` structured-segment format into one joined transcript.
///
/// Returns `None` when the body is not JSON or yields no text.
pub fn parse_json3(body: &str) -> Option<String> {
    if !body.trim_start().starts_with('{') {
        return None;
    }
    let parsed: Json3Body = serde_json::from_str(body).ok()?;

    let joined = parsed
        .events
        .iter()
        .map(|e| e.segs.iter().map(|s| s.utf8.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    non_empty(collapse_whitespace(&joined))
}

/// Parse timed-text XML (`<text start=".." dur="..">...</text>`) into one
/// joined transcript, stripping markup and decoding entities.
pub fn parse_timedtext_xml(xml: &str) -> Option<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut current = String::new();

    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e)) => {
                if e.name().as_ref() == b"text" {
                    in_text = true;
                    current.clear();
                }
            }
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if in_text {
                    current.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => {
                if e.name().as_ref() == b"text" && in_text {
                    let decoded = decode_entities(&current);
                    if !decoded.trim().is_empty() {
                        pieces.push(decoded);
                    }
                    in_text = false;
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    non_empty(collapse_whitespace(&pieces.join(" ")))
}

/// Second-level entity decode. Caption payloads are frequently
/// double-escaped (`&amp;#39;` survives the XML unescape as `&#39;`).
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
