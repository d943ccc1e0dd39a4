//! Server configuration management.
//!
//! Configuration comes from CLI arguments, environment variables or defaults,
//! in that order of precedence.
//!
//! # Configuration Sources
//!
//! - CLI arguments (`--bind`, `--key-cache-capacity`, etc.)
//! - Environment variables (`SSAD_BIND`, etc.)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use ssad_server::ServerConfig;
//!
//! let config = ServerConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("HTTP server will bind to: {}", config.bind);
//! ```

use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Upper bound accepted for `--key-cache-capacity`
pub const MAX_KEY_CACHE_CAPACITY: usize = 1_000_000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Server configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ssad-server",
    about = "HTTP mirror of the SSAD cipher engine and step visualizer",
    version
)]
pub struct ServerConfig {
    /// HTTP bind address
    #[arg(long, env = "SSAD_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Maximum number of derived keys kept in memory (0 disables caching)
    #[arg(long, env = "SSAD_KEY_CACHE_CAPACITY", default_value_t = ssad_cipher::cache::DEFAULT_CAPACITY)]
    pub key_cache_capacity: usize,

    /// Log output format
    #[arg(long, env = "SSAD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "SSAD_CORS_PERMISSIVE")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            key_cache_capacity: ssad_cipher::cache::DEFAULT_CAPACITY,
            log_format: LogFormat::Text,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key cache capacity is above
    /// [`MAX_KEY_CACHE_CAPACITY`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_cache_capacity > MAX_KEY_CACHE_CAPACITY {
            return Err(ConfigError::OutOfRange {
                field: "key-cache-capacity",
                value: self.key_cache_capacity,
                max: MAX_KEY_CACHE_CAPACITY,
            });
        }
        Ok(())
    }
}
