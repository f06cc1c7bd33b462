//! Shared application state: `Arc<Inner>` wrapping the channel engine and
//! the registries named in spec §4.5 (scene set lives inside the engine
//! itself; MCS tables, path cache, device positions, transmission state
//! are kept alongside it). Grounded on `strata_control::state::AppState`.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use wn_channel::ChannelEngine;
use wn_channel::SubprocessBackend;
use wn_linkbudget::McsSelector;
use wn_types::{LinkId, McsTable, Position};

/// One cached directional link, enough to serve `/visualization/state`
/// without recomputing anything (spec §4.5).
#[derive(Debug, Clone)]
pub struct CachedLink {
    pub tx_position: Position,
    pub rx_position: Position,
    pub distance_m: f64,
    pub delay_spread_ns: f64,
    pub paths: Vec<wn_types::PathGeometry>,
}

#[derive(Clone)]
pub struct ServiceState {
    inner: Arc<Inner>,
}

struct Inner {
    engine: Mutex<ChannelEngine<SubprocessBackend>>,
    mcs_tables: DashMap<String, McsTable>,
    mcs_selectors: DashMap<LinkId, McsSelector>,
    positions: DashMap<(String, String), Position>,
    path_cache: DashMap<LinkId, CachedLink>,
    /// Keyed by the wire identifier used in `/transmission/state` requests
    /// (`"<node>.<interface>"`), not a `(node, interface)` tuple — the
    /// request body addresses interfaces by that single string.
    transmission_state: DashMap<String, bool>,
}

impl ServiceState {
    pub fn new(worker_command: impl Into<String>) -> Self {
        let engine = ChannelEngine::new(SubprocessBackend::new(worker_command));
        Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(engine),
                mcs_tables: DashMap::new(),
                mcs_selectors: DashMap::new(),
                positions: DashMap::new(),
                path_cache: DashMap::new(),
                transmission_state: DashMap::new(),
            }),
        }
    }

    pub fn engine(&self) -> &Mutex<ChannelEngine<SubprocessBackend>> {
        &self.inner.engine
    }

    pub fn mcs_tables(&self) -> &DashMap<String, McsTable> {
        &self.inner.mcs_tables
    }

    pub fn mcs_selectors(&self) -> &DashMap<LinkId, McsSelector> {
        &self.inner.mcs_selectors
    }

    pub fn record_position(&self, node: &str, interface: &str, position: Position) {
        self.inner.positions.insert((node.to_string(), interface.to_string()), position);
    }

    pub fn position(&self, node: &str, interface: &str) -> Option<Position> {
        self.inner.positions.get(&(node.to_string(), interface.to_string())).map(|p| *p)
    }

    pub fn all_positions(&self) -> Vec<((String, String), Position)> {
        self.inner.positions.iter().map(|entry| (entry.key().clone(), *entry.value())).collect()
    }

    pub fn cache_link(&self, link_id: LinkId, cached: CachedLink) {
        self.inner.path_cache.insert(link_id, cached);
    }

    pub fn cached_link(&self, link_id: &str) -> Option<CachedLink> {
        self.inner.path_cache.get(link_id).map(|entry| entry.clone())
    }

    pub fn all_cached_links(&self) -> Vec<(LinkId, CachedLink)> {
        self.inner.path_cache.iter().map(|entry| (entry.key().clone(), entry.value().clone())).collect()
    }

    pub fn path_cache_len(&self) -> usize {
        self.inner.path_cache.len()
    }

    /// Sets the active/inactive flag for an interface id and returns
    /// whether the value actually changed (used to compute the
    /// affected-links set for `/transmission/state`).
    pub fn set_transmission_state(&self, id: &str, active: bool) -> bool {
        let previous = self.inner.transmission_state.insert(id.to_string(), active);
        previous != Some(active)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.inner.transmission_state.get(id).map(|v| *v).unwrap_or(true)
    }

    /// Directional link ids whose tx or rx endpoint matches `id`, among
    /// currently cached links — used to report which links a transmission
    /// state change affects.
    pub fn links_touching(&self, id: &str) -> Vec<LinkId> {
        let tx_prefix = format!("{id}->");
        let rx_suffix = format!("->{id}");
        self.inner
            .path_cache
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|link_id| link_id.starts_with(&tx_prefix) || link_id.ends_with(&rx_suffix))
            .collect()
    }
}
