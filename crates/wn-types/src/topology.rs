use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::antenna::AntennaProfile;
use crate::error::TopologyError;
use crate::link::Link;
use crate::mac::MacConfig;
use crate::mcs::ModulationConfig;
use crate::position::Position;

/// One wireless interface's declarative configuration, as it appears nested
/// under `nodes.<name>.interfaces.<iface>.wireless` in the YAML descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirelessInterface {
    pub position: Position,
    pub rf_power_dbm: f64,
    pub frequency_ghz: f64,
    pub bandwidth_mhz: f64,
    pub noise_figure_db: f64,
    pub rx_sensitivity_dbm: f64,
    pub antenna: AntennaProfile,
    #[serde(flatten)]
    pub modulation: ModulationConfig,
    pub packet_size_bits: u64,
    #[serde(default)]
    pub mac: Option<MacConfig>,
    #[serde(default = "WirelessInterface::default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl WirelessInterface {
    fn default_is_active() -> bool {
        true
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_ghz * 1.0e9
    }

    pub fn bandwidth_hz(&self) -> f64 {
        self.bandwidth_mhz * 1.0e6
    }

    pub fn validate(&self, context: &str) -> Result<(), TopologyError> {
        self.antenna.validate(context)?;
        if !(-30.0..=40.0).contains(&self.rf_power_dbm) {
            return Err(TopologyError::MissingField(format!(
                "{context}: rf_power_dbm {} out of range [-30, 40]",
                self.rf_power_dbm
            )));
        }
        if !(0.0..=20.0).contains(&self.noise_figure_db) {
            return Err(TopologyError::MissingField(format!(
                "{context}: noise_figure_db {} out of range [0, 20]",
                self.noise_figure_db
            )));
        }
        if !(-150.0..=0.0).contains(&self.rx_sensitivity_dbm) {
            return Err(TopologyError::MissingField(format!(
                "{context}: rx_sensitivity_dbm {} out of range [-150, 0]",
                self.rx_sensitivity_dbm
            )));
        }
        Ok(())
    }
}

/// A fixed (non-wireless) interface, carrying only the impairment already
/// applied by a peer computation — out of scope for channel computation but
/// present so a node can mix wireless and wired interfaces in point-to-point
/// mode (shared-bridge mode forbids this, per the data-model invariant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedInterface {
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterfaceConfig {
    Wireless { wireless: WirelessInterface },
    Fixed { fixed_netem: FixedInterface },
}

impl InterfaceConfig {
    pub fn as_wireless(&self) -> Option<&WirelessInterface> {
        match self {
            InterfaceConfig::Wireless { wireless } => Some(wireless),
            InterfaceConfig::Fixed { .. } => None,
        }
    }

    pub fn ip_address(&self) -> Option<&str> {
        match self {
            InterfaceConfig::Wireless { wireless } => wireless.ip_address.as_deref(),
            InterfaceConfig::Fixed { fixed_netem } => fixed_netem.ip_address.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub kind: String,
    pub image: String,
    pub interfaces: HashMap<String, InterfaceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedBridge {
    pub enabled: bool,
    pub name: String,
    pub nodes: Vec<String>,
    pub interface_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub name: String,
    #[serde(default)]
    pub prefix: Option<String>,
    pub scene: Option<SceneConfig>,
    #[serde(default)]
    pub shared_bridge: Option<SharedBridge>,
    pub nodes: HashMap<String, Node>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub enable_sinr: bool,
}

impl Topology {
    pub fn load_from_str(yaml: &str) -> Result<Self, TopologyError> {
        let topology: Topology = serde_yaml::from_str(yaml)?;
        topology.validate()?;
        Ok(topology)
    }

    pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref).map_err(|source| TopologyError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        Self::load_from_str(&contents)
    }

    fn wireless_interface(&self, node: &str, iface: &str) -> Option<&WirelessInterface> {
        self.nodes.get(node)?.interfaces.get(iface)?.as_wireless()
    }

    /// Runs every static validation named in spec §4.8 step 1 / §7.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if !self.links.is_empty() && self.shared_bridge.as_ref().is_some_and(|b| b.enabled) {
            return Err(TopologyError::LinksAndSharedBridgeBothSet);
        }

        // Duplicate node names cannot actually occur via a HashMap key, but a
        // node list embedded in shared_bridge.nodes can reference names more
        // than once or names absent from `nodes`.
        if let Some(bridge) = &self.shared_bridge {
            if bridge.enabled {
                let mut seen = HashSet::new();
                for n in &bridge.nodes {
                    if !seen.insert(n.clone()) {
                        return Err(TopologyError::DuplicateNode(n.clone()));
                    }
                    if !self.nodes.contains_key(n) {
                        return Err(TopologyError::UnknownEndpoint(
                            bridge.name.clone(),
                            n.clone(),
                            bridge.interface_name.clone(),
                        ));
                    }
                    let iface = self
                        .nodes
                        .get(n)
                        .and_then(|node| node.interfaces.get(&bridge.interface_name));
                    match iface {
                        Some(InterfaceConfig::Wireless { wireless }) => {
                            if wireless.ip_address.is_none() {
                                return Err(TopologyError::SharedBridgeMissingIp {
                                    bridge: bridge.name.clone(),
                                    node: n.clone(),
                                    interface: bridge.interface_name.clone(),
                                });
                            }
                        }
                        _ => {
                            return Err(TopologyError::SharedBridgeNonWireless {
                                bridge: bridge.name.clone(),
                                node: n.clone(),
                                interface: bridge.interface_name.clone(),
                            });
                        }
                    }
                }

                // Unique IP per participant.
                let mut ips = HashMap::new();
                for n in &bridge.nodes {
                    if let Some(InterfaceConfig::Wireless { wireless }) =
                        self.nodes.get(n).and_then(|node| node.interfaces.get(&bridge.interface_name))
                    {
                        if let Some(ip) = &wireless.ip_address {
                            if let Some(first) = ips.insert(ip.clone(), n.clone()) {
                                return Err(TopologyError::IpConflict {
                                    ip: ip.clone(),
                                    first,
                                    second: n.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }

        // Global IP uniqueness across all interfaces, bridge or not.
        let mut ip_owners: HashMap<String, String> = HashMap::new();
        for (node_name, node) in &self.nodes {
            for (iface_name, iface) in &node.interfaces {
                if let Some(ip) = iface.ip_address() {
                    let owner = format!("{node_name}.{iface_name}");
                    if let Some(first) = ip_owners.insert(ip.to_string(), owner.clone()) {
                        if first != owner {
                            return Err(TopologyError::IpConflict { ip: ip.to_string(), first, second: owner });
                        }
                    }
                }
            }
        }

        // Per-interface field validation (range checks, antenna mutual exclusion).
        for (node_name, node) in &self.nodes {
            for (iface_name, iface) in &node.interfaces {
                if let InterfaceConfig::Wireless { wireless } = iface {
                    wireless.validate(&format!("{node_name}.{iface_name}"))?;
                }
            }
        }

        // Explicit links must reference real, wireless endpoints.
        for link in &self.links {
            for (node_name, iface_name) in [&link.endpoint_a, &link.endpoint_b] {
                match self.wireless_interface(node_name, iface_name) {
                    Some(_) => {}
                    None => {
                        return Err(TopologyError::UnknownEndpoint(
                            link.name.clone(),
                            node_name.clone(),
                            iface_name.clone(),
                        ));
                    }
                }
            }
        }

        self.validate_mac_homogeneity()?;

        Ok(())
    }

    /// Mixed MAC models on the same carrier frequency are undefined; reject
    /// at validation time rather than silently picking one.
    fn validate_mac_homogeneity(&self) -> Result<(), TopologyError> {
        let mut by_frequency: HashMap<u64, &'static str> = HashMap::new();
        for node in self.nodes.values() {
            for iface in node.interfaces.values() {
                let Some(wireless) = iface.as_wireless() else { continue };
                let Some(mac) = &wireless.mac else { continue };
                let freq_key = wireless.frequency_hz().round() as u64;
                let kind = mac.kind();
                match by_frequency.get(&freq_key) {
                    Some(existing) if *existing != kind => {
                        return Err(TopologyError::MixedMacModels {
                            frequency_hz: wireless.frequency_hz(),
                            first_kind: existing.to_string(),
                            second_kind: kind.to_string(),
                        });
                    }
                    _ => {
                        by_frequency.insert(freq_key, kind);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn shared_bridge_enabled(&self) -> bool {
        self.shared_bridge.as_ref().is_some_and(|b| b.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_yaml() -> &'static str {
        r#"
name: demo
scene: null
nodes:
  a:
    kind: host
    image: alpine
    interfaces:
      wlan0:
        wireless:
          position: { x: 0.0, y: 0.0, z: 1.0 }
          rf_power_dbm: 20.0
          frequency_ghz: 5.18
          bandwidth_mhz: 80.0
          noise_figure_db: 7.0
          rx_sensitivity_dbm: -82.0
          antenna: { gain_dbi: 0.0, polarization: v }
          modulation: bpsk
          fec_code_rate: 0.5
          fec_type: none
          packet_size_bits: 12000
  b:
    kind: host
    image: alpine
    interfaces:
      wlan0:
        wireless:
          position: { x: 20.0, y: 0.0, z: 1.0 }
          rf_power_dbm: 20.0
          frequency_ghz: 5.18
          bandwidth_mhz: 80.0
          noise_figure_db: 7.0
          rx_sensitivity_dbm: -82.0
          antenna: { gain_dbi: 0.0, polarization: v }
          modulation: bpsk
          fec_code_rate: 0.5
          fec_type: none
          packet_size_bits: 12000
links:
  - name: ab
    endpoint_a: [a, wlan0]
    endpoint_b: [b, wlan0]
"#
    }

    #[test]
    fn loads_and_validates_minimal_topology() {
        let topo = Topology::load_from_str(minimal_yaml()).expect("should parse");
        assert_eq!(topo.nodes.len(), 2);
        assert_eq!(topo.links.len(), 1);
    }

    #[test]
    fn rejects_links_and_shared_bridge_together() {
        let mut topo = Topology::load_from_str(minimal_yaml()).unwrap();
        topo.shared_bridge = Some(SharedBridge {
            enabled: true,
            name: "br0".into(),
            nodes: vec!["a".into(), "b".into()],
            interface_name: "wlan0".into(),
        });
        assert!(matches!(topo.validate(), Err(TopologyError::LinksAndSharedBridgeBothSet)));
    }
}
