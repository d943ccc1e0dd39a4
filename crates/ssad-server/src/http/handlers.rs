//! HTTP request handlers for the cipher and visualizer endpoints.

use crate::server::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use ssad_cipher::{Cipher, CipherError, ErrorKind, KeyParams, Method, Mode, Trace, trace};
use std::sync::Arc;

/// Body of `POST /crypto/{encrypt,decrypt}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CryptoRequest {
    /// Text to transform
    pub text: String,
    /// Cipher to use
    pub method: Method,
    /// Key material
    #[serde(flatten)]
    pub params: KeyParams,
}

/// Body of `POST /visualize/{encrypt,decrypt}`.
///
/// Without `method`, the cipher is inferred from the parameters present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VisualizeRequest {
    /// Text to trace
    pub text: String,
    /// Cipher to use
    #[serde(default)]
    pub method: Option<Method>,
    /// Key material
    #[serde(flatten)]
    pub params: KeyParams,
}

/// Response of `POST /crypto/{encrypt,decrypt}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CryptoResponse {
    /// Transformed text
    pub result_text: String,
}

/// Handle POST /crypto/encrypt endpoint.
///
/// # Errors
///
/// Returns `ApiError` if the key is invalid.
pub async fn handle_encrypt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CryptoRequest>,
) -> Result<Json<CryptoResponse>, ApiError> {
    transform(&state, &request, Mode::Encrypt)
}

/// Handle POST /crypto/decrypt endpoint.
///
/// # Errors
///
/// Returns `ApiError` if the key is invalid, the Hill key is not invertible,
/// or the ciphertext does not split into whole blocks.
pub async fn handle_decrypt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CryptoRequest>,
) -> Result<Json<CryptoResponse>, ApiError> {
    transform(&state, &request, Mode::Decrypt)
}

/// Handle POST /visualize/encrypt endpoint.
///
/// # Errors
///
/// Returns `ApiError` if the parameters do not resolve to a valid key.
pub async fn handle_visualize_encrypt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisualizeRequest>,
) -> Result<Json<Trace>, ApiError> {
    visualize(&state, &request, Mode::Encrypt)
}

/// Handle POST /visualize/decrypt endpoint.
///
/// # Errors
///
/// Returns `ApiError` if the parameters do not resolve to a valid key or the
/// ciphertext cannot be decrypted with it.
pub async fn handle_visualize_decrypt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisualizeRequest>,
) -> Result<Json<Trace>, ApiError> {
    visualize(&state, &request, Mode::Decrypt)
}

fn transform(
    state: &AppState,
    request: &CryptoRequest,
    mode: Mode,
) -> Result<Json<CryptoResponse>, ApiError> {
    tracing::debug!(
        method = %request.method,
        %mode,
        text_len = request.text.len(),
        "Handling crypto request"
    );

    let key = request.params.resolve(Some(request.method))?;
    let codec = state.keys().codec(&key)?;
    let result_text = codec.apply(&request.text, mode)?;

    Ok(Json(CryptoResponse { result_text }))
}

fn visualize(
    state: &AppState,
    request: &VisualizeRequest,
    mode: Mode,
) -> Result<Json<Trace>, ApiError> {
    let key = request.params.resolve(request.method)?;
    tracing::debug!(
        method = %key.method(),
        %mode,
        text_len = request.text.len(),
        "Handling visualize request"
    );

    let codec = state.keys().codec(&key)?;
    let trace = trace::trace_with(&codec, &request.text, mode)?;

    Ok(Json(trace))
}

/// JSON error body: `{"detail": ..., "kind": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    /// Human readable message
    pub detail: String,
    /// `validation` or `mathematical`
    pub kind: ErrorKind,
}

/// Application-level error type for HTTP handlers.
#[derive(Debug)]
pub struct ApiError(CipherError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        tracing::warn!(?kind, error = self.0.code(), "Rejected request");

        let body = ErrorBody {
            detail: self.0.to_string(),
            kind,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<CipherError> for ApiError {
    fn from(err: CipherError) -> Self {
        Self(err)
    }
}
