//! Per-request bookkeeping.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Echo the ID back in `X-Request-ID` for client-side correlation
//! - Record request count and latency metrics
//!
//! The ID travels in request extensions so inner middleware (auth, rate
//! limit) can tag their denial logs with it.

use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::observability::metrics;

/// Correlation ID attached to every request.
#[derive(Debug, Clone, Copy)]
pub struct RequestId(pub Uuid);

/// Outermost request middleware: assigns the ID, times the request, and
/// records metrics against the final status.
pub async fn track_request_middleware(mut request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let id = Uuid::new_v4();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    request.extensions_mut().insert(RequestId(id));
    let mut response = next.run(request).await;

    metrics::record_request(&method, &path, response.status().as_u16(), start);

    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
