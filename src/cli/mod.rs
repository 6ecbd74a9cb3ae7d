//! CLI subcommand implementations for the gistify binary.

pub mod health_cmd;
pub mod history_cmd;
pub mod output;
pub mod serve_cmd;
pub mod summarize_cmd;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gistify", version, about = "Summarize pages, selections, and YouTube transcripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the summarization proxy server.
    Serve {
        /// Listening port (overrides the PORT environment variable).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Summarize a page, selection text, or YouTube transcript.
    Summarize(summarize_cmd::SummarizeArgs),
    /// Check the proxy server's health.
    Health,
    /// Manage stored summaries.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List stored summaries, newest first.
    List,
    /// Show one stored summary in full.
    Show { id: i64 },
    /// Delete one stored summary.
    Delete { id: i64 },
    /// Delete all stored summaries.
    Clear,
}
