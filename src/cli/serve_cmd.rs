//! Start the summarization proxy.

use crate::config::ServerConfig;
use crate::server;
use anyhow::Result;

/// Run the proxy until interrupted.
pub async fn run(port: Option<u16>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gistify=info".parse().unwrap()),
        )
        .init();

    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }

    server::serve(config).await
}
