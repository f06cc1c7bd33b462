//! Route tree. Each module owns one or two single-purpose endpoints rather
//! than a REST resource collection, so routers are merged flat instead of
//! nested under a path prefix.

pub mod compute;
pub mod health;
pub mod mcs_table;
pub mod scene;
pub mod sinr;
pub mod transmission;
pub mod visualization;

use axum::Router;

use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new()
        .merge(scene::router())
        .merge(compute::router())
        .merge(sinr::router())
        .merge(transmission::router())
        .merge(visualization::router())
        .merge(mcs_table::router())
        .merge(health::router())
}
