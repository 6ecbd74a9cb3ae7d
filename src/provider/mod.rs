//! Upstream generative-AI provider: prompt templates and the Gemini client.

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;
