//! `POST /compute/sinr`. Returns a bare SINR result, not a bundled
//! link outcome — the caller (the controller) re-derives MCS and netem
//! params from it via `wn_linkbudget::outcome` when SINR overrides SNR.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use wn_types::{SinrRequest, SinrResult};

use crate::error::ApiError;
use crate::pipeline;
use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new().route("/compute/sinr", post(compute_sinr))
}

async fn compute_sinr(State(state): State<ServiceState>, Json(body): Json<SinrRequest>) -> Result<Json<SinrResult>, ApiError> {
    let result = pipeline::compute_sinr(&state, &body).await?;
    Ok(Json(result))
}
