//! Prometheus metrics for the health endpoint and the status client.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Health requests served counter metric name.
pub const METRIC_STATUS_REQUESTS: &str = "status_requests_total";
/// Client fetches counter metric name, labelled by outcome.
pub const METRIC_CLIENT_FETCHES: &str = "client_fetches_total";
/// Client fetch latency metric name.
pub const METRIC_CLIENT_FETCH_LATENCY: &str = "client_fetch_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_STATUS_REQUESTS,
        "Total number of health/status requests served"
    );
    describe_counter!(
        METRIC_CLIENT_FETCHES,
        "Total number of status fetches completed by the client"
    );
    describe_histogram!(
        METRIC_CLIENT_FETCH_LATENCY,
        "Status fetch round-trip latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment health requests counter.
pub fn inc_status_requests() {
    counter!(METRIC_STATUS_REQUESTS).increment(1);
}

/// Record a completed client fetch and its latency.
pub fn record_client_fetch(start: Instant, outcome: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    counter!(METRIC_CLIENT_FETCHES, "outcome" => outcome).increment(1);
    histogram!(METRIC_CLIENT_FETCH_LATENCY).record(latency_ms);
}
