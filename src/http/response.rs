//! Client-facing error responses.
//!
//! Every failure a client can see is structured JSON, never a bare
//! transport error or a stack trace. CORS headers are attached by the
//! outer layer regardless of status, so error bodies are tagged for
//! cross-origin consumption like any 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Failure modes surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid credentials. Recoverable by retrying with a key.
    #[error("Unauthorized")]
    Unauthorized,

    /// Per-client quota exhausted. Recoverable once the window elapses.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The host process has not started (or has stopped).
    #[error("Server not started")]
    HostUnavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::HostUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
