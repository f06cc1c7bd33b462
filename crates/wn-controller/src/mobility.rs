//! The controller's own small HTTP surface: mobility updates and position
//! reads (spec §6 External Interfaces). Routed the same way the channel
//! service routes its API — one module per concern, merged flat.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use wn_types::Position;

use crate::controller::{Controller, MobilityUpdate};
use crate::error::ControllerError;

#[derive(Clone)]
pub struct MobilityState(pub Arc<Mutex<Controller>>);

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        let status = match &err {
            ControllerError::NotDeployed => StatusCode::CONFLICT,
            ControllerError::UnknownNode(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub fn router() -> Router<MobilityState> {
    Router::new()
        .route("/mobility/update", post(update_position))
        .route("/mobility/position/:node", get(get_position))
        .route("/nodes", get(list_nodes))
}

#[derive(Debug, Deserialize)]
struct MobilityUpdateRequest {
    node: String,
    interface: Option<String>,
    x: f64,
    y: f64,
    z: f64,
}

async fn update_position(State(state): State<MobilityState>, Json(body): Json<MobilityUpdateRequest>) -> Result<Json<MobilityUpdate>, ApiError> {
    let mut controller = state.0.lock().await;
    let position = Position::new(body.x, body.y, body.z);
    let update = controller.update_mobility(&body.node, body.interface.as_deref(), position).await?;
    Ok(Json(update))
}

#[derive(Debug, Serialize)]
struct PositionResponse {
    interfaces: std::collections::HashMap<String, Position>,
}

async fn get_position(State(state): State<MobilityState>, Path(node): Path<String>) -> Result<Json<PositionResponse>, ApiError> {
    let controller = state.0.lock().await;
    let positions = controller.positions();
    let interfaces = positions.get(&node).cloned().ok_or_else(|| ControllerError::UnknownNode(node.clone()))?;
    Ok(Json(PositionResponse { interfaces }))
}

async fn list_nodes(State(state): State<MobilityState>) -> Json<std::collections::HashMap<String, PositionResponse>> {
    let controller = state.0.lock().await;
    let nodes = controller
        .positions()
        .into_iter()
        .map(|(node, interfaces)| (node, PositionResponse { interfaces }))
        .collect();
    Json(nodes)
}
