//! Error types for the SSAD server.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric setting above its allowed maximum
    #[error("Invalid {field}: {value} exceeds the maximum of {max}")]
    OutOfRange {
        /// Flag name
        field: &'static str,
        /// Value that was supplied
        value: usize,
        /// Largest accepted value
        max: usize,
    },
}

/// Server runtime errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind HTTP server
    #[error("Failed to bind HTTP server to {addr}: {source}")]
    HttpBindFailed {
        /// Address that failed to bind
        addr: std::net::SocketAddr,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server shutdown error
    #[error("Server shutdown error: {0}")]
    Shutdown(String),
}
