//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webapi_requests_total` (counter): requests by method, path, status
//! - `webapi_requests_rejected_total` (counter): admission denials by reason
//! - `webapi_request_duration_seconds` (histogram): latency by path
//!
//! Recording goes through the `metrics` facade and costs an atomic
//! update; the Prometheus exposition listener is optional and runs on its
//! own address.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must run inside the API's tokio runtime. Failure is logged and
/// non-fatal: the API works without exposition.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => {
            tracing::error!(error = %error, "Failed to install metrics exporter")
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "webapi_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!("webapi_request_duration_seconds", "path" => path.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one admission denial.
pub fn record_rejected(reason: &'static str) {
    counter!("webapi_requests_rejected_total", "reason" => reason).increment(1);
}
