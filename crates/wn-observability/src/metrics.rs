//! The three counters/histograms named by the topology's operational
//! surface, exported over `/metrics` by whichever service installs the
//! recorder.

use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const LINKS_COMPUTED_TOTAL: &str = "links_computed_total";
pub const TC_APPLY_DURATION_SECONDS: &str = "tc_apply_duration_seconds";
pub const MOBILITY_UPDATES_TOTAL: &str = "mobility_updates_total";

#[derive(Clone)]
pub struct MetricsHandle(PrometheusHandle);

impl MetricsHandle {
    /// Exposition-format text for a `/metrics` endpoint.
    pub fn render(&self) -> String {
        self.0.render()
    }
}

/// Installs the global Prometheus recorder. Call once per process, before
/// any of the `record_*` helpers below.
pub fn install_recorder() -> Result<MetricsHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(MetricsHandle(handle))
}

pub fn record_link_computed() {
    metrics::counter!(LINKS_COMPUTED_TOTAL).increment(1);
}

pub fn record_tc_apply(duration: std::time::Duration) {
    metrics::histogram!(TC_APPLY_DURATION_SECONDS).record(duration.as_secs_f64());
}

pub fn record_mobility_update() {
    metrics::counter!(MOBILITY_UPDATES_TOTAL).increment(1);
}

/// A standalone `/metrics` router, merged into a service's own router.
pub fn metrics_router(handle: MetricsHandle) -> Router {
    Router::new().route("/metrics", get(move || { let handle = handle.clone(); async move { handle.render() } }))
}
