//! The gistify binary.

use clap::Parser;
use gistify::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => cli::serve_cmd::run(port).await,
        Command::Summarize(args) => cli::summarize_cmd::run(args).await,
        Command::Health => cli::health_cmd::run().await,
        Command::History { action } => cli::history_cmd::run(action),
    }
}
