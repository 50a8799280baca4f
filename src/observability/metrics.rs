//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (inbound requests, platform calls, store operations)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by route, status
//! - `gateway_platform_calls_total` (counter): platform calls by method, outcome
//! - `gateway_platform_call_duration_seconds` (histogram): platform latency
//! - `gateway_store_ops_total` (counter): balance store operations by op, outcome
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels for route, method, status code

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: String, status: u16) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_platform_call(method: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "gateway_platform_calls_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gateway_platform_call_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_op(op: &'static str, outcome: &'static str) {
    metrics::counter!("gateway_store_ops_total", "op" => op, "outcome" => outcome).increment(1);
}
