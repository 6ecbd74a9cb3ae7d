//! Prompt templates, one per summary style.
//!
//! The style string selects one of three named templates; anything else
//! gets the plain default. Content and content-type are embedded verbatim.

/// Build the upstream prompt for a summarize request.
pub fn build_prompt(style: &str, content_type: &str, content: &str) -> String {
    match style {
        "tldr" => format!(
            "You are a world-class technical summarizer. Return output as clean Markdown \
             with short paragraphs and bolded key phrases (use **bold**). Provide a concise \
             TL;DR of the following {content_type}. Do not add a title.\n\nCONTENT:\n{content}"
        ),
        "bullets" => format!(
            "You are a world-class technical summarizer. Return output strictly as a Markdown \
             unordered list. Each bullet should start with a short bolded lead like **Topic:** \
             followed by the detail. Keep bullets crisp. Do not add any intro or outro. \
             Summarize the following {content_type}.\n\nCONTENT:\n{content}"
        ),
        "friendly" => format!(
            "Write a friendly, conversational Markdown summary with short paragraphs and \
             tasteful **bold** emphasis for key terms. Avoid fluff. Summarize the following \
             {content_type}.\n\nCONTENT:\n{content}"
        ),
        _ => format!("Summarize the following {content_type} as Markdown:\n\nCONTENT:\n{content}"),
    }
}
