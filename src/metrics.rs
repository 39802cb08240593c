//! Request metrics for venue API calls.
//!
//! Recorded through the `metrics` facade; installing a recorder/exporter is
//! left to the embedding process, so these are no-ops by default.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name, labelled by outcome.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Events fetched counter metric name.
pub const METRIC_EVENTS_FETCHED: &str = "events_fetched_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of venue HTTP requests by endpoint and outcome"
    );
    describe_counter!(
        METRIC_EVENTS_FETCHED,
        "Total number of events decoded from venue responses"
    );

    debug!("Metrics initialized");
}

/// Count one finished request.
pub fn inc_http_requests(endpoint: &'static str, outcome: &'static str) {
    counter!(METRIC_HTTP_REQUESTS, "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

/// Add to the events fetched counter.
pub fn add_events_fetched(count: usize) {
    counter!(METRIC_EVENTS_FETCHED).increment(count as u64);
}

/// RAII guard for timing a request.
/// Records latency when dropped, including when the request future is dropped
/// mid-flight by a deadline or cancellation.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(latency_ms);
    }
}
