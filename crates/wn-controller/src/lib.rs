//! Deploy/destroy lifecycle, link enumeration, and the mobility HTTP
//! endpoint (spec §4.8, §6).

pub mod cleanup;
pub mod controller;
pub mod enumerate;
pub mod error;
pub mod mcs_presets;
pub mod mobility;
pub mod summary;
pub mod validate;

pub use controller::{Controller, MobilityUpdate};
pub use error::{ControllerError, LinkWarning};
pub use mobility::MobilityState;
pub use summary::DeploymentSummary;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Wraps the mobility API in the same tracing/CORS layers the channel
/// service applies to its own router, plus the shared `/metrics` endpoint.
pub fn build_router(state: MobilityState, metrics: wn_observability::MetricsHandle) -> Router {
    mobility::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(wn_observability::metrics_router(metrics))
}
