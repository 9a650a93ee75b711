//! Metrics collection and exposition.
//!
//! # Metrics
//! - `chain_requests_total` (counter): requests by service, status
//! - `chain_request_duration_seconds` (histogram): latency by service
//! - `chain_downstream_failures_total` (counter): failed outbound calls

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
///
/// Failure to start the exporter is logged, not fatal; the service keeps
/// serving without a metrics endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(service: &'static str, status: u16, start: Instant) {
    counter!("chain_requests_total", "service" => service, "status" => status.to_string())
        .increment(1);
    histogram!("chain_request_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed downstream call.
pub fn record_downstream_failure(service: &'static str) {
    counter!("chain_downstream_failures_total", "service" => service).increment(1);
}
