//! Check proxy server health.

use crate::cli::output::{self, Styled};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use anyhow::Result;

pub async fn run() -> Result<()> {
    let s = Styled::new();
    let api = ApiClient::new(ClientConfig::from_env().api_base_url);

    match api.health().await {
        Ok(health) => {
            println!("  {} proxy is {}", s.ok_sym(), health.status);
            println!("  model: {}", health.model);
            println!(
                "  gemini configured: {}",
                if health.gemini_configured { "yes" } else { "no" }
            );
            Ok(())
        }
        Err(e) => {
            output::print_error(&s, &e.to_string());
            std::process::exit(1);
        }
    }
}
