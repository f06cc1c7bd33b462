//! `POST /transmission/state`: flips the active/inactive flag for a set of
//! interfaces and reports which cached directional links touch one of them,
//! so the controller knows what to recompute.

use std::collections::{HashMap, HashSet};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new().route("/transmission/state", post(update_transmission_state))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionStateRequest {
    pub states: HashMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionStateResponse {
    pub affected_links: Vec<String>,
}

async fn update_transmission_state(
    State(state): State<ServiceState>,
    Json(body): Json<TransmissionStateRequest>,
) -> Json<TransmissionStateResponse> {
    let mut affected = HashSet::new();
    for (id, active) in &body.states {
        if state.set_transmission_state(id, *active) {
            affected.extend(state.links_touching(id));
        }
    }
    Json(TransmissionStateResponse { affected_links: affected.into_iter().collect() })
}
