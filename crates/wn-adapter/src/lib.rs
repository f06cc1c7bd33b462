//! Container orchestrator adapter: renders the declarative topology into the
//! external runtime's topology descriptor, deploys/destroys it, and resolves
//! `(node, interface)` to a namespace handle for the traffic-control driver
//! (spec §4.7).

pub mod alias;
pub mod descriptor;
pub mod error;
pub mod namespace;
pub mod runtime_client;

pub use alias::PeerRegistry;
pub use descriptor::{render, Endpoint, RuntimeDescriptor, RuntimeLink, RuntimeNode};
pub use error::AdapterError;
pub use namespace::{NamespaceHandle, NamespaceRegistry};
pub use runtime_client::RuntimeClient;

use ipnetwork::Ipv4Network;
use wn_types::Topology;

/// Deploys `topology` via `runtime`, then brings every wireless interface up
/// and (shared-bridge mode only) assigns its declared IP inside `subnet`,
/// populating `namespaces` and `aliases` as it goes (spec §4.7 Deploy).
pub async fn deploy(
    runtime: &RuntimeClient,
    topology: &Topology,
    topology_path: &str,
    subnet_prefix_len: u8,
    namespaces: &mut NamespaceRegistry,
    aliases: &mut PeerRegistry,
) -> Result<(), AdapterError> {
    let descriptor = render(topology);
    runtime.deploy(&descriptor, topology_path).await?;

    for link in &descriptor.links {
        aliases.insert(link.a.node.clone(), link.b.node.clone(), link.a.interface.clone());
        aliases.insert(link.b.node.clone(), link.a.node.clone(), link.b.interface.clone());
    }

    for node in &descriptor.nodes {
        if node.image.is_empty() {
            continue; // synthetic bridge node: no namespace to configure.
        }
        let handle = runtime.discover_namespace(&node.name).await?;
        let Some(declared_node) = topology.nodes.get(&node.name) else { continue };

        for (iface_name, iface) in &declared_node.interfaces {
            let Some(wireless) = iface.as_wireless() else { continue };
            namespaces.insert(node.name.clone(), iface_name.clone(), handle.clone());
            namespace::bring_up(&handle, iface_name).await?;

            if topology.shared_bridge_enabled() {
                if let Some(ip) = &wireless.ip_address {
                    let address: std::net::Ipv4Addr = ip.parse().map_err(|_| {
                        AdapterError::DiscoveryFailed(node.name.clone(), iface_name.clone(), format!("invalid IP address '{ip}'"))
                    })?;
                    let network = Ipv4Network::new(address, subnet_prefix_len)
                        .map_err(|e| AdapterError::DiscoveryFailed(node.name.clone(), iface_name.clone(), e.to_string()))?;
                    namespace::assign_address(&handle, iface_name, network).await?;
                }
            }
        }
    }

    Ok(())
}

/// Invokes the runtime's destroy command and discards namespace handles
/// (spec §4.7 Destroy).
pub async fn destroy(runtime: &RuntimeClient, topology_path: &str, namespaces: &mut NamespaceRegistry) -> Result<(), AdapterError> {
    runtime.destroy(topology_path).await?;
    namespaces.clear();
    Ok(())
}
