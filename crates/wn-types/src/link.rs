use serde::{Deserialize, Serialize};

use crate::antenna::AntennaProfile;
use crate::mac::MacConfig;
use crate::mcs::ModulationConfig;
use crate::position::Position;

/// Stable identifier for one *directional* link, e.g. `"nodeA.wlan0->nodeB.wlan0"`.
pub type LinkId = String;

pub fn make_link_id(tx_node: &str, tx_iface: &str, rx_node: &str, rx_iface: &str) -> LinkId {
    format!("{tx_node}.{tx_iface}->{rx_node}.{rx_iface}")
}

/// An explicit point-to-point link in the topology descriptor, named pair of
/// `(node, interface)` endpoints. Mutually exclusive with shared-bridge mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub endpoint_a: (String, String),
    pub endpoint_b: (String, String),
}

/// One endpoint's worth of data needed by the channel service to compute a
/// directional link: position, antenna, power, and the modulation the link
/// budget math needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointRequest {
    pub node: String,
    pub interface: String,
    pub position: Position,
    pub antenna: AntennaProfile,
    pub rf_power_dbm: f64,
    pub frequency_hz: f64,
    pub bandwidth_hz: f64,
    pub noise_figure_db: f64,
    pub rx_sensitivity_dbm: f64,
}

/// Full request for `compute/single` and one element of `compute/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequest {
    pub link_id: LinkId,
    pub tx: EndpointRequest,
    pub rx: EndpointRequest,
    pub scene_file: Option<String>,
    pub packet_size_bits: u64,
    pub modulation: ModulationConfig,
    pub mac: Option<MacConfig>,
}

/// One candidate interferer for a `compute/sinr` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfererRequest {
    pub interferer_id: String,
    pub tx: EndpointRequest,
    pub is_active: bool,
    pub mac: Option<MacConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinrRequest {
    pub link: LinkRequest,
    pub interferers: Vec<InterfererRequest>,
}
