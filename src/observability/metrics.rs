//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rest_client_calls_total` (counter): calls by interface, method, backend, outcome
//! - `rest_client_call_duration_seconds` (histogram): call latency
//! - `rest_client_installs_total` (counter): injection sites by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_call(interface: &str, method: &str, backend: &str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "rest_client_calls_total",
        "interface" => interface.to_string(),
        "method" => method.to_string(),
        "backend" => backend.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "rest_client_call_duration_seconds",
        "interface" => interface.to_string(),
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_install(outcome: &'static str) {
    metrics::counter!("rest_client_installs_total", "outcome" => outcome).increment(1);
}
