//! Interface aliasing: a wireless interface may carry traffic to more than
//! one peer, so per-link netem updates in point-to-point mode need a
//! `(node, peer) -> interface` lookup to find the right interface (spec
//! §4.7).

use std::collections::HashMap;

use crate::error::AdapterError;

#[derive(Debug, Default)]
pub struct PeerRegistry {
    aliases: HashMap<(String, String), String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<String>, peer: impl Into<String>, interface: impl Into<String>) {
        self.aliases.insert((node.into(), peer.into()), interface.into());
    }

    pub fn interface_for(&self, node: &str, peer: &str) -> Result<&str, AdapterError> {
        self.aliases
            .get(&(node.to_string(), peer.to_string()))
            .map(String::as_str)
            .ok_or_else(|| AdapterError::AliasNotFound(node.to_string(), peer.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_interface_for_a_known_peer() {
        let mut registry = PeerRegistry::new();
        registry.insert("a", "b", "wlan0");
        registry.insert("a", "c", "wlan1");
        assert_eq!(registry.interface_for("a", "b").unwrap(), "wlan0");
        assert_eq!(registry.interface_for("a", "c").unwrap(), "wlan1");
        assert!(registry.interface_for("a", "d").is_err());
    }
}
