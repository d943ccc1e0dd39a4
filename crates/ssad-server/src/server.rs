//! Server state management and orchestration.
//!
//! Holds the key cache shared by all HTTP handlers.

use crate::config::ServerConfig;
use crate::error::ServerError;
use ssad_cipher::KeyCache;
use std::sync::Arc;
use std::time::SystemTime;

/// Shared application state for HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Derived Playfair squares and Hill matrices
    keys: KeyCache,

    /// Server start time
    started_at: SystemTime,
}

impl AppState {
    /// Create new application state from configuration.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        tracing::info!(
            capacity = config.key_cache_capacity,
            "Key cache initialized"
        );

        Self {
            keys: KeyCache::new(config.key_cache_capacity),
            started_at: SystemTime::now(),
        }
    }

    /// Get the shared key cache.
    #[must_use]
    pub const fn keys(&self) -> &KeyCache {
        &self.keys
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.started_at)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Server orchestration.
pub struct Server {
    /// Shared application state
    state: Arc<AppState>,
    /// Server configuration
    config: ServerConfig,
}

impl Server {
    /// Create new server with configuration.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if the configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let state = AppState::new(&config);

        Ok(Self {
            state: Arc::new(state),
            config,
        })
    }

    /// Run the HTTP server until interrupted.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding fails or the shutdown signal cannot
    /// be installed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting SSAD server");
        tracing::info!("HTTP server binding to: {}", self.config.bind);
        if self.config.cors_permissive {
            tracing::info!("CORS: permissive");
        }

        let listener = crate::http::bind(self.config.bind).await?;
        let app = crate::http::create_router(self.state.clone(), self.config.cors_permissive);

        let http_server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("HTTP server failed: {e}");
            }
        });

        // Wait for shutdown signal
        tokio::signal::ctrl_c().await.map_err(|e| {
            ServerError::Shutdown(format!("Failed to listen for shutdown signal: {e}"))
        })?;

        tracing::info!(
            uptime_seconds = self.state.uptime_seconds(),
            cached_keys = self.state.keys().len(),
            "Shutdown signal received, stopping server"
        );

        http_server.abort();

        Ok(())
    }

    /// Get shared application state.
    #[must_use]
    pub const fn state(&self) -> &Arc<AppState> {
        &self.state
    }
}
