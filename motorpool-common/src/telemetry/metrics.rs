//! Prometheus metrics setup and metric definitions

use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Seconds; sub-millisecond buckets for in-process mediator calls
    let buckets = [
        0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}

/// Register metric descriptions and emit zero values so the exposition
/// carries HELP/TYPE lines from startup.
pub fn describe_metrics() {
    describe_counter!("motorpool_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "motorpool_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "motorpool_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    describe_counter!(
        "motorpool_mediator_requests_total",
        "Requests dispatched through the mediator by request and outcome"
    );
    describe_histogram!(
        "motorpool_mediator_request_duration_seconds",
        "Mediator pipeline duration in seconds"
    );

    describe_counter!(
        "motorpool_events_published_total",
        "Domain event notifications by event type and result"
    );
    describe_counter!(
        "motorpool_upstream_requests_total",
        "Outgoing service-to-service HTTP requests by result"
    );

    gauge!("motorpool_http_requests_in_flight").set(0.0);
    counter!("motorpool_events_published_total", "event_type" => "", "result" => "ok").absolute(0);
}
