use serde::{Deserialize, Serialize};

/// CSMA/CA parameters carried on a wireless interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsmaParams {
    /// Carrier-sense range multiplier applied to the nominal communication
    /// range. Default 2.5.
    #[serde(default = "CsmaParams::default_sense_range_multiplier")]
    pub sense_range_multiplier: f64,
    /// Duty-cycle fraction used as `tx_probability` in the hidden-node
    /// regime. Default 0.3.
    #[serde(default = "CsmaParams::default_traffic_load")]
    pub traffic_load: f64,
}

impl CsmaParams {
    fn default_sense_range_multiplier() -> f64 {
        2.5
    }
    fn default_traffic_load() -> f64 {
        0.3
    }
}

impl Default for CsmaParams {
    fn default() -> Self {
        Self {
            sense_range_multiplier: Self::default_sense_range_multiplier(),
            traffic_load: Self::default_traffic_load(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAssignmentMode {
    Fixed,
    RoundRobin,
    Random,
    Distributed,
}

/// Which TDMA slots (of `num_slots` in a `frame_duration_ms` frame) an
/// interface owns, or the probability it owns any given slot in the
/// stochastic assignment modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotAssignment {
    Explicit(Vec<u32>),
    OwnershipProbability(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdmaParams {
    pub frame_duration_ms: f64,
    pub num_slots: u32,
    pub mode: SlotAssignmentMode,
    pub assignment: SlotAssignment,
}

/// Closed set of MAC model variants available on an interface. Mixing CSMA
/// and TDMA interfaces on the same frequency is undefined and rejected by
/// the controller's validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacConfig {
    Csma(CsmaParams),
    Tdma(TdmaParams),
}

impl MacConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            MacConfig::Csma(_) => "csma",
            MacConfig::Tdma(_) => "tdma",
        }
    }
}
