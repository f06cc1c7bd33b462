//! `GET /health`.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
