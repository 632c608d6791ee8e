//! Prometheus metrics
//!
//! Counters are recorded inline in the handlers with the `metrics` macros;
//! this module owns the exporter and the `/metrics` endpoint.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Idempotent; returns the render handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// GET /metrics
pub async fn metrics_handler() -> String {
    HANDLE.get().map(|handle| handle.render()).unwrap_or_default()
}

/// Count a handled request per endpoint and outcome.
pub fn record_request(endpoint: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("kontrak_requests_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
}
