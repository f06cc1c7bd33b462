//! Stateful HTTP channel service: scene loading, single/batch/SINR link
//! compute, transmission-state updates, and the path cache behind the
//! visualization endpoint.

pub mod api;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod state;

pub use client::{ChannelServiceClient, ClientError};
pub use error::{ApiError, ServiceError};
pub use state::ServiceState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: ServiceState, metrics: wn_observability::MetricsHandle) -> Router {
    api::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(wn_observability::metrics_router(metrics))
}
