//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sqlgate_requests_total` (counter): requests by method, status
//! - `sqlgate_request_duration_seconds` (histogram): latency by method
//! - `sqlgate_validations_total` (counter): validator outcomes
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "sqlgate_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "sqlgate_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one validator outcome (`canonical`, `parse_failure`, `rejected`).
pub fn record_validation(outcome: &'static str) {
    metrics::counter!("sqlgate_validations_total", "outcome" => outcome).increment(1);
}
