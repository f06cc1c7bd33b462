//! Renders a declarative [`Topology`] into the external container runtime's
//! topology file: one node per declared node, and links either as explicit
//! veth pairs or, in shared-bridge mode, as a bridge node plus one veth per
//! participant (spec §4.7).

use serde::{Deserialize, Serialize};
use wn_types::Topology;

/// One endpoint of a veth link: `(node, interface)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub node: String,
    pub interface: String,
}

impl Endpoint {
    fn new(node: impl Into<String>, interface: impl Into<String>) -> Self {
        Self { node: node.into(), interface: interface.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeNode {
    pub name: String,
    pub kind: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeLink {
    pub a: Endpoint,
    pub b: Endpoint,
}

/// The rendered topology file, serialized as YAML for the runtime CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub nodes: Vec<RuntimeNode>,
    pub links: Vec<RuntimeLink>,
}

/// Name of the synthetic bridge node inserted in shared-bridge mode.
const BRIDGE_KIND: &str = "bridge";

pub fn render(topology: &Topology) -> RuntimeDescriptor {
    let mut nodes: Vec<RuntimeNode> = topology
        .nodes
        .iter()
        .map(|(name, node)| RuntimeNode { name: name.clone(), kind: node.kind.clone(), image: node.image.clone() })
        .collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));

    let mut links = Vec::new();

    if let Some(bridge) = topology.shared_bridge.as_ref().filter(|b| b.enabled) {
        nodes.push(RuntimeNode { name: bridge.name.clone(), kind: BRIDGE_KIND.to_string(), image: String::new() });
        let mut participants = bridge.nodes.clone();
        participants.sort();
        for node in participants {
            links.push(RuntimeLink {
                a: Endpoint::new(node, bridge.interface_name.clone()),
                b: Endpoint::new(bridge.name.clone(), bridge.interface_name.clone()),
            });
        }
    } else {
        let mut explicit: Vec<RuntimeLink> = topology
            .links
            .iter()
            .map(|link| RuntimeLink {
                a: Endpoint::new(link.endpoint_a.0.clone(), link.endpoint_a.1.clone()),
                b: Endpoint::new(link.endpoint_b.0.clone(), link.endpoint_b.1.clone()),
            })
            .collect();
        explicit.sort_by(|x, y| (&x.a.node, &x.a.interface).cmp(&(&y.a.node, &y.a.interface)));
        links = explicit;
    }

    RuntimeDescriptor { name: topology.name.clone(), prefix: topology.prefix.clone(), nodes, links }
}

pub fn to_yaml(descriptor: &RuntimeDescriptor) -> Result<String, crate::AdapterError> {
    Ok(serde_yaml::to_string(descriptor)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_types::Topology;

    fn point_to_point_yaml() -> &'static str {
        r#"
name: demo
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
    fn renders_explicit_veth_link() {
        let topo = Topology::load_from_str(point_to_point_yaml()).unwrap();
        let descriptor = render(&topo);
        assert_eq!(descriptor.nodes.len(), 2);
        assert_eq!(descriptor.links.len(), 1);
        assert_eq!(descriptor.links[0].a, Endpoint::new("a", "wlan0"));
        assert_eq!(descriptor.links[0].b, Endpoint::new("b", "wlan0"));
    }

    #[test]
    fn renders_bridge_node_and_spoke_veths_in_shared_bridge_mode() {
        let mut topo = Topology::load_from_str(point_to_point_yaml()).unwrap();
        topo.links.clear();
        topo.shared_bridge = Some(wn_types::SharedBridge {
            enabled: true,
            name: "br0".into(),
            nodes: vec!["b".into(), "a".into()],
            interface_name: "wlan0".into(),
        });

        let descriptor = render(&topo);
        assert_eq!(descriptor.nodes.len(), 3);
        assert!(descriptor.nodes.iter().any(|n| n.name == "br0" && n.kind == BRIDGE_KIND));
        assert_eq!(descriptor.links.len(), 2);
        assert_eq!(descriptor.links[0].a.node, "a");
        assert_eq!(descriptor.links[0].b.node, "br0");
    }
}
