//! `POST /mcs_table/register`.
//!
//! Not part of the literal external-interfaces list: the data model
//! requires a named MCS table registry for adaptive modulation but the
//! wire contract is silent on how entries get into it. Added as the
//! pragmatic registration mechanism; see DESIGN.md.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use wn_types::{McsEntry, McsTable};

use crate::error::ApiError;
use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new().route("/mcs_table/register", post(register_mcs_table))
}

#[derive(Debug, Deserialize)]
pub struct RegisterMcsTableRequest {
    pub name: String,
    pub entries: Vec<McsEntry>,
}

async fn register_mcs_table(State(state): State<ServiceState>, Json(body): Json<RegisterMcsTableRequest>) -> Result<StatusCode, ApiError> {
    let table = McsTable::new(body.name.clone(), body.entries).map_err(|e| ApiError::bad_request(e.to_string()))?;
    state.mcs_tables().insert(body.name, table);
    Ok(StatusCode::CREATED)
}
