//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): requests by method and outcome;
//!   methods outside the standard verbs share the `OTHER` label
//! - `bridge_request_duration_seconds` (histogram): end-to-end handling time
//! - `bridge_enqueue_duration_seconds` (histogram): backend call latency
//! - `bridge_enqueue_errors_total` (counter): failed backend calls

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::bridge::RequestOutcome;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Label value for a request method.
///
/// Clients may send any token as a method, so only the standard verbs get
/// their own series.
pub fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "CONNECT" => "CONNECT",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "PATCH" => "PATCH",
        _ => "OTHER",
    }
}

/// Record the terminal state of one request.
pub fn record_request(method: &str, outcome: RequestOutcome, start: Instant) {
    counter!(
        "bridge_requests_total",
        "method" => method_label(method),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    histogram!("bridge_request_duration_seconds", "outcome" => outcome.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Record one backend enqueue call.
pub fn record_enqueue(backend: &'static str, elapsed: Duration, ok: bool) {
    histogram!("bridge_enqueue_duration_seconds", "backend" => backend).record(elapsed.as_secs_f64());
    if !ok {
        counter!("bridge_enqueue_errors_total", "backend" => backend).increment(1);
    }
}
