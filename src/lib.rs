//! Gistify — summarize web pages, selections, and YouTube transcripts.
//!
//! The crate splits into a client side and a server side of one binary:
//!
//! - **Acquisition** ([`acquisition`]) turns a URL or pasted text into
//!   plain content: page extraction via [`extraction`], or the YouTube
//!   transcript fallback chain (player state → listing API → panel scrape).
//! - **The proxy** ([`server`]) exposes `POST /api/summarize` and
//!   `GET /api/health`, holds the Gemini credential, rate-limits clients,
//!   and calls the upstream API via [`provider`].
//! - **History** ([`history`]) keeps the last 50 results in a single JSON
//!   slot on disk.

pub mod acquisition;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod extraction;
pub mod history;
pub mod provider;
pub mod server;

pub use error::GistifyError;
