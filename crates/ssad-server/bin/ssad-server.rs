//! SSAD server binary entry point.
//!
//! Parses configuration, initializes logging and runs the server until
//! interrupted. For library usage, see the ssad-server crate documentation.

use anyhow::Result;
use ssad_server::{LogFormat, Server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_args();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    tracing::info!(
        "Configuration loaded: bind={}, key_cache_capacity={}",
        config.bind,
        config.key_cache_capacity
    );

    let server = Server::new(config)?;
    server.run().await?;

    Ok(())
}
