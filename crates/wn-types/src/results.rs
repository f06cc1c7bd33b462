use serde::{Deserialize, Serialize};

use crate::mcs::McsSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantPath {
    Los,
    Nlos,
    Diffraction,
}

/// One ray-traced (or free-space) path, kept for the path cache / visualization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathGeometry {
    pub vertices: Vec<(f64, f64, f64)>,
    pub interaction_sequence: Vec<String>,
    pub power_db: f64,
    pub delay_ns: f64,
}

/// Raw channel metrics for one directional link, per spec §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResult {
    pub path_loss_db: f64,
    pub delay_spread_ns: f64,
    pub dominant_path: DominantPath,
    pub distance_m: f64,
    pub strongest_path_power_db: f64,
    pub strongest_path_delay_ns: f64,
    pub num_paths: u32,
    pub paths: Vec<PathGeometry>,
}

impl ChannelResult {
    /// Degenerate result reported when the link is physically unusable or
    /// the solver returned no data: maximum loss, minimum (zero) rate.
    pub fn degenerate(distance_m: f64) -> Self {
        Self {
            path_loss_db: 300.0,
            delay_spread_ns: 0.0,
            dominant_path: DominantPath::Nlos,
            distance_m,
            strongest_path_power_db: -300.0,
            strongest_path_delay_ns: 0.0,
            num_paths: 0,
            paths: Vec::new(),
        }
    }
}

/// Per-interferer breakdown for a SINR computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterferenceContribution {
    pub interferer_id: String,
    pub raw_power_dbm: f64,
    pub frequency_separation_hz: f64,
    pub aclr_db: f64,
    pub effective_power_dbm: f64,
    pub tx_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinrResult {
    pub signal_power_dbm: f64,
    pub noise_floor_dbm: f64,
    pub interference_power_dbm: f64,
    pub sinr_db: f64,
    pub active_interferer_count: u32,
    pub contributions: Vec<InterferenceContribution>,
}

/// Netem parameters derived from physics: the handoff from physics to
/// kernel queueing discipline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetemParams {
    pub delay_ms: f64,
    pub jitter_ms: f64,
    pub loss_percent: f64,
    pub rate_mbps: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum NetemParamsError {
    #[error("delay_ms must be >= 0, got {0}")]
    NegativeDelay(f64),
    #[error("loss_percent must be within [0, 100], got {0}")]
    LossOutOfRange(f64),
    #[error("rate_mbps must be > 0, got {0}")]
    NonPositiveRate(f64),
}

impl NetemParams {
    pub fn new(delay_ms: f64, jitter_ms: f64, loss_percent: f64, rate_mbps: f64) -> Result<Self, NetemParamsError> {
        if delay_ms < 0.0 {
            return Err(NetemParamsError::NegativeDelay(delay_ms));
        }
        if !(0.0..=100.0).contains(&loss_percent) {
            return Err(NetemParamsError::LossOutOfRange(loss_percent));
        }
        if rate_mbps <= 0.0 {
            return Err(NetemParamsError::NonPositiveRate(rate_mbps));
        }
        Ok(Self { delay_ms, jitter_ms: jitter_ms.max(0.0), loss_percent, rate_mbps })
    }

    /// Degenerate parameters used when a link is unusable: maximum loss,
    /// minimum viable rate (clamped above zero, per the `rate_mbps > 0`
    /// invariant — the kernel qdisc still needs a positive rate to program).
    pub fn degenerate() -> Self {
        Self { delay_ms: 1000.0, jitter_ms: 0.0, loss_percent: 100.0, rate_mbps: 0.001 }
    }
}

/// Bundled per-link outcome produced by the controller pipeline, used for the
/// deployment summary and for mobility re-applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOutcome {
    pub link_id: String,
    pub channel: ChannelResult,
    pub sinr: Option<SinrResult>,
    pub mcs: McsSelection,
    pub netem: NetemParams,
}
