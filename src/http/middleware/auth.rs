//! Authentication middleware.
//!
//! First admission stage on protected routes. Runs before the rate
//! limiter so that rejected requests never consume quota.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::http::request::RequestId;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn auth_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.authenticator.authorize(request.headers()) {
        return next.run(request).await;
    }

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.to_string())
        .unwrap_or_default();
    tracing::warn!(
        client = %addr.ip(),
        request_id = %request_id,
        path = %request.uri().path(),
        "Rejected request without valid credentials"
    );
    metrics::record_rejected("unauthorized");
    ApiError::Unauthorized.into_response()
}
