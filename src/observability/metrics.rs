//! Metrics collection and exposition.
//!
//! # Metrics
//! - `feed_requests_total` (counter): requests by method, status
//! - `feed_request_duration_seconds` (histogram): time to response headers
//! - `feed_items_streamed_total` (counter): restaurants written, by body format
//! - `feed_log_failures_total` (counter): streams aborted by a failing log action
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   exporter every call is a no-op
//! - No path label: the request identifier is a path segment and would
//!   explode label cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "feed_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("feed_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_item_streamed(format: &'static str) {
    counter!("feed_items_streamed_total", "format" => format).increment(1);
}

pub fn record_log_failure() {
    counter!("feed_log_failures_total").increment(1);
}
