//! Ambient stack shared by the two long-running services and the CLI:
//! tracing setup, the Prometheus metrics surface, and a one-line
//! classify-and-log helper for link-level failures (spec §7, §9).

pub mod classify;
pub mod metrics;
pub mod tracing_init;

pub use classify::classify_and_log;
pub use metrics::{install_recorder, metrics_router, record_link_computed, record_mobility_update, record_tc_apply, MetricsHandle};
pub use tracing_init::{init_tracing, init_tracing_cli};
