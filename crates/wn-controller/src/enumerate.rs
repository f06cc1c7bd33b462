//! Expands the declarative topology into the directional links the
//! controller drives end to end (spec §4.8 step 2).

use std::collections::{BTreeSet, HashMap};

use wn_types::{make_link_id, EndpointRequest, LinkId, LinkRequest, Topology, WirelessInterface};

/// One wireless interface, resolved out of the topology for enumeration.
#[derive(Debug, Clone)]
pub struct WirelessEndpoint {
    pub node: String,
    pub interface: String,
    pub config: WirelessInterface,
}

impl WirelessEndpoint {
    /// The id used consistently across the channel service's transmission-
    /// state map and the controller's own interferer bookkeeping.
    pub fn id(&self) -> String {
        format!("{}.{}", self.node, self.interface)
    }
}

pub fn wireless_endpoints(topology: &Topology) -> Vec<WirelessEndpoint> {
    let mut endpoints = Vec::new();
    for (node, node_cfg) in &topology.nodes {
        for (iface, iface_cfg) in &node_cfg.interfaces {
            if let Some(wireless) = iface_cfg.as_wireless() {
                endpoints.push(WirelessEndpoint { node: node.clone(), interface: iface.clone(), config: wireless.clone() });
            }
        }
    }
    endpoints.sort_by(|a, b| (&a.node, &a.interface).cmp(&(&b.node, &b.interface)));
    endpoints
}

pub fn endpoint_request(ep: &WirelessEndpoint) -> EndpointRequest {
    EndpointRequest {
        node: ep.node.clone(),
        interface: ep.interface.clone(),
        position: ep.config.position,
        antenna: ep.config.antenna.clone(),
        rf_power_dbm: ep.config.rf_power_dbm,
        frequency_hz: ep.config.frequency_hz(),
        bandwidth_hz: ep.config.bandwidth_hz(),
        noise_figure_db: ep.config.noise_figure_db,
        rx_sensitivity_dbm: ep.config.rx_sensitivity_dbm,
    }
}

/// One directional edge plus enough of each endpoint's declared config to
/// build a `LinkRequest` and, later, drive a tc apply.
#[derive(Debug, Clone)]
pub struct DirectionalLink {
    pub link_id: LinkId,
    pub tx: WirelessEndpoint,
    pub rx: WirelessEndpoint,
}

/// Builds every directional link implied by the topology: two edges per
/// explicit point-to-point link, or the full `N*(N-1)` all-pairs set over a
/// shared-bridge domain's members (spec §4.8 step 2).
pub fn directional_links(topology: &Topology) -> Vec<DirectionalLink> {
    let endpoints = wireless_endpoints(topology);
    let by_key: HashMap<(&str, &str), &WirelessEndpoint> =
        endpoints.iter().map(|e| ((e.node.as_str(), e.interface.as_str()), e)).collect();

    let mut links = Vec::new();

    if let Some(bridge) = topology.shared_bridge.as_ref().filter(|b| b.enabled) {
        for tx_node in &bridge.nodes {
            for rx_node in &bridge.nodes {
                if tx_node == rx_node {
                    continue;
                }
                let (Some(tx), Some(rx)) = (
                    by_key.get(&(tx_node.as_str(), bridge.interface_name.as_str())),
                    by_key.get(&(rx_node.as_str(), bridge.interface_name.as_str())),
                ) else {
                    continue;
                };
                links.push(DirectionalLink {
                    link_id: make_link_id(&tx.node, &tx.interface, &rx.node, &rx.interface),
                    tx: (*tx).clone(),
                    rx: (*rx).clone(),
                });
            }
        }
    } else {
        for link in &topology.links {
            let (a_node, a_iface) = &link.endpoint_a;
            let (b_node, b_iface) = &link.endpoint_b;
            if let (Some(a), Some(b)) = (by_key.get(&(a_node.as_str(), a_iface.as_str())), by_key.get(&(b_node.as_str(), b_iface.as_str())))
            {
                links.push(DirectionalLink { link_id: make_link_id(&a.node, &a.interface, &b.node, &b.interface), tx: (*a).clone(), rx: (*b).clone() });
                links.push(DirectionalLink { link_id: make_link_id(&b.node, &b.interface, &a.node, &a.interface), tx: (*b).clone(), rx: (*a).clone() });
            }
        }
    }

    links
}

/// Distinct `(scene_file, frequency_hz, bandwidth_hz)` triples appearing in
/// the enumeration (spec §4.8 step 3: "ask the channel service to load
/// once"). The topology carries a single scene file, so this reduces to the
/// distinct receiver frequencies — computed at the receiver's carrier,
/// matching the channel service's own convention. `bandwidth_hz` is carried
/// through for wire-contract parity only; the first link observed at a
/// given frequency supplies it.
pub fn scenes_to_load(topology: &Topology, links: &[DirectionalLink]) -> Vec<(String, u64, f64)> {
    let Some(scene) = &topology.scene else { return Vec::new() };
    let mut by_frequency: HashMap<u64, f64> = HashMap::new();
    for link in links {
        let frequency_hz = link.rx.config.frequency_hz().round() as u64;
        by_frequency.entry(frequency_hz).or_insert_with(|| link.rx.config.bandwidth_hz());
    }
    let frequencies: BTreeSet<u64> = by_frequency.keys().copied().collect();
    frequencies.into_iter().map(|f| (scene.file.clone(), f, by_frequency[&f])).collect()
}

/// Builds the `LinkRequest` body for one directional link, tagged with the
/// topology's scene file (if any — `None` lets the channel service fall
/// back to free-space).
pub fn link_request(link: &DirectionalLink, scene_file: Option<&str>) -> LinkRequest {
    LinkRequest {
        link_id: link.link_id.clone(),
        tx: endpoint_request(&link.tx),
        rx: endpoint_request(&link.rx),
        scene_file: scene_file.map(str::to_string),
        packet_size_bits: link.rx.config.packet_size_bits,
        modulation: link.rx.config.modulation.clone(),
        mac: link.rx.config.mac.clone(),
    }
}

/// Candidate interferers for a directional link: every other wireless
/// interface in the topology besides the link's own tx and rx (spec §4.8
/// step 5, "the other active transmitters on nearby frequencies" — ACLR
/// rejection in `wn-interference` handles the "nearby" qualification, so
/// the candidate set here is simply everyone else).
pub fn candidate_interferers<'a>(link: &DirectionalLink, endpoints: &'a [WirelessEndpoint]) -> Vec<&'a WirelessEndpoint> {
    endpoints
        .iter()
        .filter(|e| !(e.node == link.tx.node && e.interface == link.tx.interface) && !(e.node == link.rx.node && e.interface == link.rx.interface))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_bridge_yaml() -> &'static str {
        r#"
name: demo
shared_bridge:
  enabled: true
  name: br0
  nodes: [a, b, c]
  interface_name: wlan0
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
          ip_address: 10.0.0.1
  b:
    kind: host
    image: alpine
    interfaces:
      wlan0:
        wireless:
          position: { x: 10.0, y: 0.0, z: 1.0 }
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
          ip_address: 10.0.0.2
  c:
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
          ip_address: 10.0.0.3
"#
    }

    #[test]
    fn shared_bridge_enumerates_all_pairs() {
        let topo = Topology::load_from_str(shared_bridge_yaml()).unwrap();
        let links = directional_links(&topo);
        assert_eq!(links.len(), 3 * 2);
    }

    #[test]
    fn candidate_interferers_excludes_the_link_itself() {
        let topo = Topology::load_from_str(shared_bridge_yaml()).unwrap();
        let endpoints = wireless_endpoints(&topo);
        let links = directional_links(&topo);
        let link = links.iter().find(|l| l.tx.node == "a" && l.rx.node == "b").unwrap();
        let interferers = candidate_interferers(link, &endpoints);
        assert_eq!(interferers.len(), 1);
        assert_eq!(interferers[0].node, "c");
    }
}
