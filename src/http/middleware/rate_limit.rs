//! Rate-limiting middleware.
//!
//! Second admission stage on protected routes, keyed by the client's
//! network identity (remote IP). With `rate_limit.enabled = false` the
//! stage admits everything and the limiter keeps no state.

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

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.rate_limit.enabled {
        return next.run(request).await;
    }

    let client = addr.ip().to_string();
    if state.limiter.admit(&client) {
        return next.run(request).await;
    }

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.to_string())
        .unwrap_or_default();
    tracing::warn!(
        client = %client,
        request_id = %request_id,
        path = %request.uri().path(),
        "Rate limit exceeded"
    );
    metrics::record_rejected("rate_limited");
    ApiError::RateLimited.into_response()
}
