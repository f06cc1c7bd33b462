//! `POST /scene/load`.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ServiceError};
use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new().route("/scene/load", post(load_scene))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSceneRequest {
    pub file: String,
    pub frequency_hz: u64,
    /// Carried for parity with the wire contract; the engine keys scenes by
    /// frequency alone and does not need bandwidth to load one.
    pub bandwidth_hz: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSceneResponse {}

async fn load_scene(State(state): State<ServiceState>, Json(body): Json<LoadSceneRequest>) -> Result<Json<LoadSceneResponse>, ApiError> {
    let mut engine = state.engine().lock().await;
    engine
        .load_scene(&body.file, body.frequency_hz)
        .await
        .map_err(|e| ApiError::from(ServiceError::from(e)))?;
    Ok(Json(LoadSceneResponse {}))
}
