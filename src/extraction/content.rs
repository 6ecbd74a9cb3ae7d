//! Main-content extraction from a fetched HTML document.
//!
//! Mirrors what a reader-mode pass does: drop script/style/navigation
//! chrome and ad containers, then probe a fixed list of content-container
//! selectors and take the first match's text, falling back to the whole
//! body. The result is whitespace-normalized and capped at
//! [`MAX_CONTENT_CHARS`] characters.

use scraper::{ElementRef, Html, Selector};

/// Maximum characters of extracted content sent upstream.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Marker appended when content is truncated.
const ELLIPSIS: &str = "...";

/// Tags stripped wholesale before text collection.
const STRIP_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript",
];

/// Class names treated as ad/sidebar boilerplate.
const STRIP_CLASSES: &[&str] = &["ad", "advertisement", "sidebar"];

/// Content-container selectors, probed in order.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    ".content",
    ".post-content",
    ".entry-content",
    ".article-content",
    "#content",
    "#main",
];

/// Extract the main text content of an HTML document.
///
/// Deterministic for a fixed input. Returns an empty string when the
/// document has no usable text.
pub fn extract_content(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    if let Some(root) = find_content_root(&document) {
        collect_text(root, &mut raw);
    }

    let normalized = normalize_whitespace(&raw);
    truncate_content(&normalized, MAX_CONTENT_CHARS)
}

/// Probe the content selectors in order; fall back to `<body>`.
fn find_content_root(document: &Html) -> Option<ElementRef<'_>> {
    for selector in CONTENT_SELECTORS {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(el) = document.select(&sel).next() {
                return Some(el);
            }
        }
    }

    if let Ok(body) = Selector::parse("body") {
        if let Some(el) = document.select(&body).next() {
            return Some(el);
        }
    }
    None
}

/// Walk the subtree under `el`, appending text while skipping boilerplate
/// elements. Equivalent to `textContent` after removing the stripped nodes.
fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            scraper::Node::Text(text) => out.push_str(text),
            scraper::Node::Element(element) => {
                if STRIP_TAGS.contains(&element.name()) {
                    continue;
                }
                if element.classes().any(|c| STRIP_CLASSES.contains(&c)) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace: runs of intra-line whitespace become one space,
/// runs of whitespace containing a newline become one newline. Leading and
/// trailing whitespace is dropped.
pub fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    let mut pending_newline = false;

    for ch in input.chars() {
        if ch == '\n' || ch == '\r' {
            pending_newline = true;
        } else if ch.is_whitespace() {
            pending_space = true;
        } else {
            if !out.is_empty() {
                if pending_newline {
                    out.push('\n');
                } else if pending_space {
                    out.push(' ');
                }
            }
            pending_space = false;
            pending_newline = false;
            out.push(ch);
        }
    }

    out
}

/// Cap `input` at `max` characters, appending an ellipsis marker when the
/// input exceeds the cap. Counts characters, not bytes.
pub fn truncate_content(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len());
            out.push_str(&input[..byte_idx]);
            out.push_str(ELLIPSIS);
            out
        }
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_no_double_spaces_or_newlines() {
        let inputs = [
            "a  b\t\tc",
            "a\n\n\nb",
            "  leading and trailing  ",
            "mix \t \n \n of\r\n everything \n",
            "",
        ];
        for input in inputs {
            let out = normalize_whitespace(input);
            assert!(!out.contains("  "), "double space in {out:?}");
            assert!(!out.contains("\n\n"), "double newline in {out:?}");
            assert!(!out.starts_with(char::is_whitespace));
            assert!(!out.ends_with(char::is_whitespace));
        }
    }

    #[test]
    fn test_normalize_keeps_single_separators() {
        assert_eq!(normalize_whitespace("one two"), "one two");
        assert_eq!(normalize_whitespace("one\ntwo"), "one\ntwo");
        // A run mixing spaces and newlines collapses to one newline.
        assert_eq!(normalize_whitespace("one \n \n two"), "one\ntwo");
    }

    #[test]
    fn test_truncate_exact_length_and_prefix() {
        let input = "x".repeat(12_000);
        let out = truncate_content(&input, MAX_CONTENT_CHARS);
        assert_eq!(out.chars().count(), MAX_CONTENT_CHARS + 3);
        assert!(out.ends_with("..."));
        assert!(input.starts_with(out.trim_end_matches('.')));
    }

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate_content("short", MAX_CONTENT_CHARS), "short");
        let exactly = "y".repeat(MAX_CONTENT_CHARS);
        assert_eq!(truncate_content(&exactly, MAX_CONTENT_CHARS), exactly);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let input = "é".repeat(20);
        let out = truncate_content(&input, 10);
        assert_eq!(out.chars().count(), 13);
        assert!(out.starts_with(&"é".repeat(10)));
    }

    #[test]
    fn test_extract_prefers_main_over_body() {
        let html = r#"
        <html><body>
            <nav>Site navigation</nav>
            <main><p>The real story.</p></main>
            <footer>Copyright</footer>
        </body></html>"#;
        assert_eq!(extract_content(html), "The real story.");
    }

    #[test]
    fn test_extract_probes_selectors_in_order() {
        // `main` beats `article` because it is probed first.
        let html = r#"
        <html><body>
            <article>Secondary article text</article>
            <main>Primary main text</main>
        </body></html>"#;
        assert_eq!(extract_content(html), "Primary main text");

        let html = r#"
        <html><body>
            <div class="post-content">From the post body</div>
            <div id="content">From the id container</div>
        </body></html>"#;
        assert_eq!(extract_content(html), "From the post body");
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = "<html><body><div><p>Just a plain page.</p></div></body></html>";
        assert_eq!(extract_content(html), "Just a plain page.");
    }

    #[test]
    fn test_extract_strips_boilerplate() {
        let html = r#"
        <html><body>
            <script>var x = 1;</script>
            <style>.a { color: red }</style>
            <div class="sidebar">Related links</div>
            <div class="ad">Buy now</div>
            <p>Keep this sentence.</p>
            <aside>Not this one.</aside>
        </body></html>"#;
        let out = extract_content(html);
        assert_eq!(out, "Keep this sentence.");
    }

    #[test]
    fn test_extract_strips_nested_boilerplate_inside_content() {
        let html = r#"
        <html><body><main>
            <p>Before.</p>
            <script>tracking();</script>
            <div class="advertisement">Sponsored</div>
            <p>After.</p>
        </main></body></html>"#;
        let out = extract_content(html);
        assert!(out.contains("Before."));
        assert!(out.contains("After."));
        assert!(!out.contains("Sponsored"));
        assert!(!out.contains("tracking"));
    }

    #[test]
    fn test_extract_empty_document() {
        assert_eq!(extract_content(""), "");
        assert_eq!(extract_content("<html><body></body></html>"), "");
    }

    #[test]
    fn test_extract_truncates_long_pages() {
        let body = "word ".repeat(5_000);
        let html = format!("<html><body><main>{body}</main></body></html>");
        let out = extract_content(&html);
        assert_eq!(out.chars().count(), MAX_CONTENT_CHARS + 3);
        assert!(out.ends_with("..."));
    }
}
