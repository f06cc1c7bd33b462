//! `POST /compute/single` and `POST /compute/batch`.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use wn_types::{LinkOutcome, LinkRequest};

use crate::error::ApiError;
use crate::pipeline;
use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new()
        .route("/compute/single", post(compute_single))
        .route("/compute/batch", post(compute_batch))
}

async fn compute_single(State(state): State<ServiceState>, Json(body): Json<LinkRequest>) -> Result<Json<LinkOutcome>, ApiError> {
    let outcome = pipeline::compute_link_outcome(&state, &body).await?;
    Ok(Json(outcome))
}

/// Batching is a latency optimization on the client side; each link is
/// still computed individually and in request order.
async fn compute_batch(State(state): State<ServiceState>, Json(body): Json<Vec<LinkRequest>>) -> Result<Json<Vec<LinkOutcome>>, ApiError> {
    let mut outcomes = Vec::with_capacity(body.len());
    for request in &body {
        outcomes.push(pipeline::compute_link_outcome(&state, request).await?);
    }
    Ok(Json(outcomes))
}
