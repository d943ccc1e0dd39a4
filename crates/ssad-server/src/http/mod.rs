//! HTTP server implementation using axum.

use crate::error::ServerError;
use crate::server::AppState;
use axum::Router;
use axum::routing::post;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod handlers;

/// Create HTTP router with all endpoints.
pub fn create_router(state: Arc<AppState>, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/crypto/encrypt", post(handlers::handle_encrypt))
        .route("/crypto/decrypt", post(handlers::handle_decrypt))
        .route("/visualize/encrypt", post(handlers::handle_visualize_encrypt))
        .route("/visualize/decrypt", post(handlers::handle_visualize_decrypt))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    let router = if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Bind the HTTP listener.
///
/// # Errors
///
/// Returns `ServerError::HttpBindFailed` if the address cannot be bound.
pub async fn bind(bind_addr: SocketAddr) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|source| ServerError::HttpBindFailed {
            addr: bind_addr,
            source,
        })?;

    match listener.local_addr() {
        Ok(addr) => tracing::info!("HTTP server listening on {}", addr),
        Err(_) => tracing::info!("HTTP server listening on {}", bind_addr),
    }

    Ok(listener)
}
