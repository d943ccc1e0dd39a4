//! HTTP mirror of the SSAD cipher engine.
//!
//! Exposes the engine in [`ssad_cipher`] over four JSON endpoints:
//! - `POST /crypto/encrypt` and `POST /crypto/decrypt` return `{"result_text": ...}`
//! - `POST /visualize/encrypt` and `POST /visualize/decrypt` return the step trace
//!
//! Failures map to `400 Bad Request` with `{"detail": ..., "kind": ...}`.
//!
//! # Architecture
//!
//! - `server`: Server orchestration and shared state
//! - `config`: Configuration loading and validation
//! - `http`: Router and handlers
//!
//! # Example
//!
//! ```no_run
//! use ssad_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = ServerConfig::from_args();
//!     let server = Server::new(config)?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod http;
pub mod server;

pub use config::{LogFormat, ServerConfig};
pub use error::{ConfigError, ServerError};
pub use server::{AppState, Server};
