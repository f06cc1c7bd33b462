//! Maps `(node, interface)` to a namespace handle discovered from the
//! container runtime, and brings interfaces up (plus, in shared-bridge
//! mode, assigns the declared IP inside a documented `/24`) via `ip netns
//! exec` — the same subprocess idiom `wn-tc` uses to drive `tc`, since the
//! adapter only needs to touch namespaces the runtime already created, not
//! create them itself.

use std::collections::HashMap;
use std::process::Output;

use ipnetwork::Ipv4Network;
use tokio::process::Command;
use tracing::debug;

use crate::error::AdapterError;

/// Opaque handle to a running container's network namespace, as exposed by
/// the runtime (a named namespace, or the container's PID under `/proc`).
pub type NamespaceHandle = String;

/// Owns `(node, interface) -> namespace handle`, populated at deploy and
/// invalidated at destroy (spec §3 ownership).
#[derive(Debug, Default)]
pub struct NamespaceRegistry {
    handles: HashMap<(String, String), NamespaceHandle>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<String>, interface: impl Into<String>, handle: NamespaceHandle) {
        self.handles.insert((node.into(), interface.into()), handle);
    }

    pub fn get(&self, node: &str, interface: &str) -> Result<&NamespaceHandle, AdapterError> {
        self.handles
            .get(&(node.to_string(), interface.to_string()))
            .ok_or_else(|| AdapterError::NamespaceNotFound(node.to_string(), interface.to_string()))
    }

    /// Clears every mapping; called on destroy (handles are no longer valid).
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }
}

async fn run_ip(namespace: &str, args: &[String]) -> Result<Output, AdapterError> {
    debug!(namespace, ?args, "running ip inside namespace");
    let output = Command::new("ip").arg("netns").arg("exec").arg(namespace).arg("ip").args(args).output().await?;
    Ok(output)
}

/// Brings `interface` up inside `namespace`.
pub async fn bring_up(namespace: &str, interface: &str) -> Result<(), AdapterError> {
    let args = vec!["link".to_string(), "set".into(), interface.into(), "up".into()];
    let output = run_ip(namespace, &args).await?;
    if !output.status.success() {
        return Err(AdapterError::DiscoveryFailed(
            namespace.to_string(),
            interface.to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }
    Ok(())
}

/// Assigns `address` (within a documented `/24`, not `/32`, so bridge ARP
/// and multi-hop routing work per spec §4.7) to `interface` inside `namespace`.
pub async fn assign_address(namespace: &str, interface: &str, address: Ipv4Network) -> Result<(), AdapterError> {
    let args = vec!["addr".to_string(), "add".into(), address.to_string(), "dev".into(), interface.into()];
    let output = run_ip(namespace, &args).await?;
    if !output.status.success() {
        return Err(AdapterError::DiscoveryFailed(
            namespace.to_string(),
            interface.to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mapping_is_an_error() {
        let registry = NamespaceRegistry::new();
        assert!(registry.get("a", "wlan0").is_err());
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut registry = NamespaceRegistry::new();
        registry.insert("a", "wlan0", "netns-a-wlan0".to_string());
        assert_eq!(registry.get("a", "wlan0").unwrap(), "netns-a-wlan0");
        registry.clear();
        assert!(registry.is_empty());
    }
}
