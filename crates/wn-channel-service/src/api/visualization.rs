//! `GET /visualization/state`: everything the notebook-based visualization
//! consumes, reconstructed from the service's own state rather than
//! recomputed.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use wn_channel::SceneObject;
use wn_types::Position;

use crate::state::{CachedLink, ServiceState};

pub fn router() -> Router<ServiceState> {
    Router::new().route("/visualization/state", get(visualization_state))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceView {
    pub node: String,
    pub interface: String,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathView {
    pub vertices: Vec<(f64, f64, f64)>,
    pub interaction_sequence: Vec<String>,
    pub is_los: bool,
    pub power_db: f64,
    pub delay_ns: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkVisualization {
    pub link_id: String,
    pub tx_position: Position,
    pub rx_position: Position,
    pub distance_m: f64,
    pub delay_spread_ns: f64,
    /// `1 / (5 * tau_rms)`; `None` when the delay spread is zero (single
    /// path, coherence bandwidth undefined).
    pub coherence_bandwidth_hz: Option<f64>,
    /// `10*log10(P_los / sum(P_nlos))`; `None` when the link has no
    /// line-of-sight path.
    pub rician_k_factor_db: Option<f64>,
    /// Up to the five strongest paths, by power.
    pub paths: Vec<PathView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationState {
    pub scene_file: Option<String>,
    pub scene_objects: Vec<SceneObject>,
    pub devices: Vec<DeviceView>,
    pub paths: Vec<LinkVisualization>,
    pub cache_size: usize,
}

async fn visualization_state(State(state): State<ServiceState>) -> Json<VisualizationState> {
    let (scene_file, scene_objects) = {
        let engine = state.engine().lock().await;
        let mut file = None;
        let mut objects = Vec::new();
        for (_frequency_hz, summary) in engine.scenes().all() {
            if file.is_none() {
                file = Some(summary.file.clone());
            }
            objects.extend(summary.objects.iter().cloned());
        }
        (file, objects)
    };

    let devices = state
        .all_positions()
        .into_iter()
        .map(|((node, interface), position)| DeviceView { node, interface, position })
        .collect();

    let paths = state.all_cached_links().into_iter().map(|(link_id, cached)| link_visualization(link_id, cached)).collect();

    Json(VisualizationState { scene_file, scene_objects, devices, paths, cache_size: state.path_cache_len() })
}

fn link_visualization(link_id: String, cached: CachedLink) -> LinkVisualization {
    let mut los_linear = 0.0;
    let mut nlos_linear = 0.0;
    let mut has_los = false;
    for path in &cached.paths {
        let linear = 10f64.powf(path.power_db / 10.0);
        if path.interaction_sequence.is_empty() {
            los_linear += linear;
            has_los = true;
        } else {
            nlos_linear += linear;
        }
    }
    let rician_k_factor_db = if !has_los {
        None
    } else if nlos_linear > 0.0 {
        Some(10.0 * (los_linear / nlos_linear).log10())
    } else {
        Some(f64::INFINITY)
    };

    let coherence_bandwidth_hz =
        if cached.delay_spread_ns > 0.0 { Some(1.0 / (5.0 * cached.delay_spread_ns * 1.0e-9)) } else { None };

    let mut strongest = cached.paths;
    strongest.sort_by(|a, b| b.power_db.partial_cmp(&a.power_db).unwrap());
    strongest.truncate(5);
    let paths = strongest
        .into_iter()
        .map(|p| PathView {
            is_los: p.interaction_sequence.is_empty(),
            vertices: p.vertices,
            interaction_sequence: p.interaction_sequence,
            power_db: p.power_db,
            delay_ns: p.delay_ns,
        })
        .collect();

    LinkVisualization {
        link_id,
        tx_position: cached.tx_position,
        rx_position: cached.rx_position,
        distance_m: cached.distance_m,
        delay_spread_ns: cached.delay_spread_ns,
        coherence_bandwidth_hz,
        rician_k_factor_db,
        paths,
    }
}
