//! Telemetry initialization: metrics and structured logging

pub mod metrics;

use crate::config::TelemetryConfig;
use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise logging and, when enabled, the Prometheus recorder.
///
/// `default_filter` applies when `RUST_LOG` is unset, e.g.
/// `"vendor_configuration=info,motorpool_common=info,tower_http=debug"`.
/// Returns the Prometheus handle so the server can expose `/metrics`.
pub fn init(
    config: &TelemetryConfig,
    default_filter: &str,
) -> anyhow::Result<Option<PrometheusHandle>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let prometheus_handle = if config.metrics_enabled {
        let handle = metrics::install_prometheus_recorder()?;
        metrics::describe_metrics();
        Some(handle)
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        // Flatten so `message` is a top-level key
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true);
        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    tracing::info!(
        service = %config.service_name,
        log_format = %config.log_format,
        metrics_enabled = config.metrics_enabled,
        "Telemetry initialised"
    );

    Ok(prometheus_handle)
}
