//! Fluent builder for synthesizing a `Topology` in code, without hand-writing
//! YAML. Used by tests and by `wn-cli info` to print an example descriptor.

use std::collections::HashMap;

use crate::antenna::{AntennaPattern, AntennaProfile, Polarization};
use crate::link::Link;
use crate::mcs::{FecType, Modulation, ModulationConfig};
use crate::position::Position;
use crate::topology::{InterfaceConfig, Node, SharedBridge, Topology, WirelessInterface};

pub struct WirelessInterfaceBuilder {
    iface: WirelessInterface,
}

impl WirelessInterfaceBuilder {
    pub fn new(position: Position, frequency_ghz: f64, bandwidth_mhz: f64) -> Self {
        Self {
            iface: WirelessInterface {
                position,
                rf_power_dbm: 20.0,
                frequency_ghz,
                bandwidth_mhz,
                noise_figure_db: 7.0,
                rx_sensitivity_dbm: -82.0,
                antenna: AntennaProfile::named(AntennaPattern::Iso, Polarization::V),
                modulation: ModulationConfig::Fixed {
                    modulation: Modulation::Qam64,
                    fec_code_rate: 0.5,
                    fec_type: FecType::Ldpc,
                },
                packet_size_bits: 12_000,
                mac: None,
                is_active: true,
                ip_address: None,
            },
        }
    }

    pub fn rf_power_dbm(mut self, dbm: f64) -> Self {
        self.iface.rf_power_dbm = dbm;
        self
    }

    pub fn antenna(mut self, antenna: AntennaProfile) -> Self {
        self.iface.antenna = antenna;
        self
    }

    pub fn modulation(mut self, modulation: ModulationConfig) -> Self {
        self.iface.modulation = modulation;
        self
    }

    pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
        self.iface.ip_address = Some(ip.into());
        self
    }

    pub fn build(self) -> WirelessInterface {
        self.iface
    }
}

pub struct TopologyBuilder {
    name: String,
    prefix: Option<String>,
    nodes: HashMap<String, Node>,
    links: Vec<Link>,
    shared_bridge: Option<SharedBridge>,
    enable_sinr: bool,
}

impl TopologyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            nodes: HashMap::new(),
            links: Vec::new(),
            shared_bridge: None,
            enable_sinr: false,
        }
    }

    pub fn add_node(mut self, name: impl Into<String>, image: impl Into<String>, wireless: WirelessInterface, iface_name: impl Into<String>) -> Self {
        let mut interfaces = HashMap::new();
        interfaces.insert(iface_name.into(), InterfaceConfig::Wireless { wireless });
        self.nodes.insert(name.into(), Node { kind: "host".to_string(), image: image.into(), interfaces });
        self
    }

    pub fn add_link(mut self, name: impl Into<String>, a: (&str, &str), b: (&str, &str)) -> Self {
        self.links.push(Link {
            name: name.into(),
            endpoint_a: (a.0.to_string(), a.1.to_string()),
            endpoint_b: (b.0.to_string(), b.1.to_string()),
        });
        self
    }

    pub fn with_shared_bridge(mut self, name: impl Into<String>, nodes: Vec<String>, interface_name: impl Into<String>) -> Self {
        self.shared_bridge = Some(SharedBridge { enabled: true, name: name.into(), nodes, interface_name: interface_name.into() });
        self
    }

    pub fn enable_sinr(mut self) -> Self {
        self.enable_sinr = true;
        self
    }

    pub fn build(self) -> Topology {
        Topology {
            name: self.name,
            prefix: self.prefix,
            scene: None,
            shared_bridge: self.shared_bridge,
            nodes: self.nodes,
            links: self.links,
            enable_sinr: self.enable_sinr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_two_node_point_to_point_topology() {
        let a = WirelessInterfaceBuilder::new(Position::new(0.0, 0.0, 1.0), 5.18, 80.0).build();
        let b = WirelessInterfaceBuilder::new(Position::new(20.0, 0.0, 1.0), 5.18, 80.0).build();
        let topo = TopologyBuilder::new("demo")
            .add_node("a", "alpine", a, "wlan0")
            .add_node("b", "alpine", b, "wlan0")
            .add_link("ab", ("a", "wlan0"), ("b", "wlan0"))
            .build();
        assert!(topo.validate().is_ok());
    }
}
