//! Owns the full deploy/destroy/mobility lifecycle against one topology
//! (spec §4.8). Holds the one mutable copy of the topology, the adapter's
//! namespace/alias registries, the per-link MCS hysteresis state, and the
//! last-applied outcome for every link so a mobility update can recompute
//! only what moved and retain everything else (spec §9: "the controller
//! holds the single owning copy").

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use wn_adapter::{NamespaceRegistry, PeerRegistry, RuntimeClient};
use wn_channel_service::{ChannelServiceClient, ClientError};
use wn_linkbudget::{default_jitter_policy, derive_netem, select_mcs_entry, McsSelector};
use wn_tc::{BridgeDestination, HtbConfig, NetemConfig, TbfConfig, TcManager};
use wn_types::topology::InterfaceConfig;
use wn_types::{ChannelResult, InterfererRequest, LinkId, LinkOutcome, LinkRequest, McsSelection, McsTable, ModulationConfig, NetemParams, Position, SinrRequest, SinrResult, Topology};

use crate::enumerate::{self, DirectionalLink};
use crate::error::{ControllerError, LinkWarning};
use crate::mcs_presets;
use crate::summary::DeploymentSummary;
use crate::validate;

/// `/24`, as documented for shared-bridge address assignment (spec §4.7).
const SUBNET_PREFIX_LEN: u8 = 24;

/// Floor on mobility recompute cadence (spec §4.8 "one full update per second").
const MOBILITY_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Minimum SNR movement, in dB, required to re-apply a link's tc parameters
/// on a mobility update (spec §4.8 "hysteresis-gated... 3 dB SNR change
/// required to re-apply"). A link whose evaluated SNR hasn't moved this much
/// since its last applied outcome keeps its current netem parameters.
const MOBILITY_SNR_HYSTERESIS_DB: f64 = 3.0;

/// How many `/compute/*` calls the controller keeps in flight at once. The
/// channel service is single-threaded cooperative I/O (spec §5); this just
/// keeps the controller from serializing a batch that could overlap on the
/// wire.
const COMPUTE_CONCURRENCY: usize = 8;

/// Outcome of one mobility update: which links were recomputed, any
/// link-level warnings, and whether the update was dropped by the rate
/// limiter (in which case nothing changed).
#[derive(Debug, Clone, serde::Serialize)]
pub struct MobilityUpdate {
    pub recomputed: Vec<LinkId>,
    pub warnings: Vec<LinkWarning>,
    pub rate_limited: bool,
}

pub struct Controller {
    topology: Topology,
    topology_path: String,
    channel: ChannelServiceClient,
    runtime: RuntimeClient,
    tc: TcManager,
    namespaces: NamespaceRegistry,
    aliases: PeerRegistry,
    mcs_tables: HashMap<String, McsTable>,
    selectors: HashMap<LinkId, McsSelector>,
    outcomes: HashMap<LinkId, LinkOutcome>,
    last_mobility_apply: Option<Instant>,
    deployed: bool,
}

impl Controller {
    pub fn new(topology: Topology, topology_path: impl Into<String>, channel: ChannelServiceClient, runtime_binary: impl Into<String>) -> Self {
        let owned_interfaces: BTreeSet<String> =
            enumerate::wireless_endpoints(&topology).into_iter().map(|e| e.interface).collect();

        Self {
            topology,
            topology_path: topology_path.into(),
            channel,
            runtime: RuntimeClient::new(runtime_binary),
            tc: TcManager::new(owned_interfaces),
            namespaces: NamespaceRegistry::new(),
            aliases: PeerRegistry::new(),
            mcs_tables: HashMap::new(),
            selectors: HashMap::new(),
            outcomes: HashMap::new(),
            last_mobility_apply: None,
            deployed: false,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn is_deployed(&self) -> bool {
        self.deployed
    }

    /// Every wireless interface's current position, grouped by node, for the
    /// mobility read endpoints (spec §6).
    pub fn positions(&self) -> HashMap<String, HashMap<String, Position>> {
        let mut by_node: HashMap<String, HashMap<String, Position>> = HashMap::new();
        for ep in enumerate::wireless_endpoints(&self.topology) {
            by_node.entry(ep.node).or_default().insert(ep.interface, ep.config.position);
        }
        by_node
    }

    /// The full lifecycle: validate, deploy via the adapter, register MCS
    /// tables, load scenes, compute every directional link, apply tc, and
    /// emit the summary (spec §4.8 steps 1-9).
    pub async fn deploy(&mut self) -> Result<DeploymentSummary, ControllerError> {
        validate::validate(&self.topology)?;

        wn_adapter::deploy(&self.runtime, &self.topology, &self.topology_path, SUBNET_PREFIX_LEN, &mut self.namespaces, &mut self.aliases).await?;
        self.deployed = true;

        self.register_mcs_tables().await?;

        let links = enumerate::directional_links(&self.topology);
        for (file, frequency_hz, bandwidth_hz) in enumerate::scenes_to_load(&self.topology, &links) {
            info!(file = %file, frequency_hz, "loading scene");
            self.channel.load_scene(&file, frequency_hz, bandwidth_hz).await?;
        }

        let (mut outcomes, mut warnings) = self.compute_all(&links).await;
        for link in &links {
            outcomes.entry(link.link_id.clone()).or_insert_with(|| degenerate_outcome(link));
        }

        warnings.extend(self.apply_all(&links, &outcomes).await);

        self.outcomes = outcomes;

        let summary = DeploymentSummary { topology_name: self.topology.name.clone(), links: self.outcomes.values().cloned().collect(), warnings };
        summary.log();
        Ok(summary)
    }

    /// Tears down everything the adapter deployed. Idempotent: calling this
    /// when nothing is deployed is a no-op, so the SIGINT/SIGTERM cleanup
    /// path can call it unconditionally (spec §9).
    /// No-op if this `Controller` hasn't deployed in this process (spec §8
    /// "destroying an already-destroyed topology is a no-op"). Guards
    /// against a double call from the HTTP surface racing the SIGINT/SIGTERM
    /// handler within the same long-running process; a standalone `destroy`
    /// invocation in a fresh process has no such in-memory state to guard,
    /// so it goes through [`Controller::force_destroy`] instead.
    pub async fn destroy(&mut self) -> Result<(), ControllerError> {
        if !self.deployed {
            return Ok(());
        }
        self.force_destroy().await
    }

    /// Runs the underlying destroy unconditionally, regardless of this
    /// `Controller`'s in-memory `deployed` flag. The `wn-cli destroy`
    /// subcommand is its own process with no prior deploy state to check,
    /// and relies on the runtime's own destroy command being idempotent.
    pub async fn force_destroy(&mut self) -> Result<(), ControllerError> {
        wn_adapter::destroy(&self.runtime, &self.topology_path, &mut self.namespaces).await?;
        self.deployed = false;
        self.outcomes.clear();
        self.selectors.clear();
        Ok(())
    }

    /// Moves one node's wireless interface(s) and recomputes every link that
    /// touches it. Rate-limited to one full update per second; a call inside
    /// that window is accepted but produces no recompute (spec §4.8 "On
    /// mobility update"). A link whose recompute fails keeps its
    /// last-applied outcome rather than being torn down (graceful
    /// degradation).
    pub async fn update_mobility(&mut self, node: &str, interface: Option<&str>, position: Position) -> Result<MobilityUpdate, ControllerError> {
        if !self.deployed {
            return Err(ControllerError::NotDeployed);
        }

        let node_cfg = self.topology.nodes.get_mut(node).ok_or_else(|| ControllerError::UnknownNode(node.to_string()))?;
        let mut touched = false;
        for (iface_name, iface_cfg) in node_cfg.interfaces.iter_mut() {
            if interface.is_some_and(|want| want != iface_name) {
                continue;
            }
            if let InterfaceConfig::Wireless { wireless } = iface_cfg {
                wireless.position = position;
                touched = true;
            }
        }
        if !touched {
            return Err(ControllerError::UnknownNode(format!("{node}.{}", interface.unwrap_or("*"))));
        }

        if let Some(last) = self.last_mobility_apply {
            if last.elapsed() < MOBILITY_MIN_INTERVAL {
                return Ok(MobilityUpdate { recomputed: Vec::new(), warnings: Vec::new(), rate_limited: true });
            }
        }
        self.last_mobility_apply = Some(Instant::now());
        wn_observability::record_mobility_update();

        let affected: Vec<DirectionalLink> =
            enumerate::directional_links(&self.topology).into_iter().filter(|l| l.tx.node == node || l.rx.node == node).collect();

        let (outcomes, warnings) = self.compute_all(&affected).await;
        let mut all_warnings = warnings;

        // Gate re-apply on SNR movement: a link whose evaluated SNR hasn't
        // moved past the hysteresis margin since the last applied outcome
        // keeps its current netem parameters untouched.
        let mut changed = HashMap::new();
        let mut held = 0usize;
        for (id, outcome) in outcomes {
            let moved_enough = self
                .outcomes
                .get(&id)
                .map(|prev| (outcome.mcs.evaluated_snr_db - prev.mcs.evaluated_snr_db).abs() >= MOBILITY_SNR_HYSTERESIS_DB)
                .unwrap_or(true);
            if moved_enough {
                changed.insert(id, outcome);
            } else {
                held += 1;
            }
        }
        if held > 0 {
            debug!(node, held, "mobility update held netem parameters within the SNR hysteresis margin");
        }

        all_warnings.extend(self.apply_all(&affected, &changed).await);

        let recomputed: Vec<LinkId> = changed.keys().cloned().collect();
        for (id, outcome) in changed {
            self.outcomes.insert(id, outcome);
        }

        if !all_warnings.is_empty() {
            warn!(node, warnings = all_warnings.len(), "mobility update completed with warnings, retaining last-known parameters for affected links");
        }

        Ok(MobilityUpdate { recomputed, warnings: all_warnings, rate_limited: false })
    }

    /// Registers every adaptive-modulation interface's named MCS table with
    /// the channel service (spec §4.8 step 3's registration half) and keeps
    /// a local copy for the SINR-override re-derivation in `compute_all`.
    async fn register_mcs_tables(&mut self) -> Result<(), ControllerError> {
        let mut names = BTreeSet::new();
        for ep in enumerate::wireless_endpoints(&self.topology) {
            if let ModulationConfig::Adaptive { mcs_table, .. } = &ep.config.modulation {
                names.insert(mcs_table.clone());
            }
        }
        for name in names {
            let table = mcs_presets::resolve(&name).ok_or_else(|| ControllerError::UnknownMcsPreset(name.clone()))?;
            self.channel.register_mcs_table(&table).await?;
            self.mcs_tables.insert(name, table);
        }
        Ok(())
    }

    /// Computes plain-SNR outcomes for `links` concurrently, then (if
    /// enabled) overrides SNR with SINR per receiver and re-selects MCS
    /// locally. Returns only the links that succeeded; the caller decides
    /// how to fill in the rest (degenerate at deploy, retained-as-is at
    /// mobility).
    async fn compute_all(&mut self, links: &[DirectionalLink]) -> (HashMap<LinkId, LinkOutcome>, Vec<LinkWarning>) {
        let scene_file = self.topology.scene.as_ref().map(|s| s.file.as_str());
        let requests: Vec<LinkRequest> = links.iter().map(|l| enumerate::link_request(l, scene_file)).collect();

        let mut outcomes = HashMap::new();
        let mut warnings = Vec::new();
        for (link_id, result) in compute_batch_concurrent(&self.channel, requests).await {
            match result {
                Ok(outcome) => {
                    wn_observability::record_link_computed();
                    outcomes.insert(link_id, outcome);
                }
                Err(e) => warnings.push(LinkWarning::transport(link_id, e.to_string())),
            }
        }

        if self.topology.enable_sinr {
            let endpoints = enumerate::wireless_endpoints(&self.topology);
            let sinr_requests: Vec<(LinkId, SinrRequest)> = links
                .iter()
                .filter(|l| outcomes.contains_key(&l.link_id))
                .map(|l| {
                    let request = enumerate::link_request(l, scene_file);
                    let interferers = enumerate::candidate_interferers(l, &endpoints)
                        .into_iter()
                        .map(|e| InterfererRequest {
                            interferer_id: e.id(),
                            tx: enumerate::endpoint_request(e),
                            is_active: e.config.is_active,
                            mac: e.config.mac.clone(),
                        })
                        .collect();
                    (l.link_id.clone(), SinrRequest { link: request, interferers })
                })
                .collect();

            let sinr_results = compute_sinr_concurrent(&self.channel, sinr_requests).await;

            for link in links {
                let Some(sinr_result) = sinr_results.get(&link.link_id) else { continue };
                let outcome_present = outcomes.contains_key(&link.link_id);
                if !outcome_present {
                    continue;
                }
                match sinr_result {
                    Ok(sinr) => {
                        if let Err(e) = self.reselect_with_sinr(link, &mut outcomes, sinr) {
                            warnings.push(LinkWarning::sinr(link.link_id.clone(), e.to_string()));
                        }
                    }
                    Err(e) => warnings.push(LinkWarning::sinr(link.link_id.clone(), e.to_string())),
                }
            }
        }

        (outcomes, warnings)
    }

    /// Re-selects MCS against `sinr` instead of the plain-SNR value the
    /// channel service already picked, and re-derives netem from the new
    /// selection (spec §4.8 step 5).
    fn reselect_with_sinr(
        &mut self,
        link: &DirectionalLink,
        outcomes: &mut HashMap<LinkId, LinkOutcome>,
        sinr: &SinrResult,
    ) -> Result<(), wn_linkbudget::LinkOutcomeError> {
        let modulation = &link.rx.config.modulation;
        let table = match modulation {
            ModulationConfig::Adaptive { mcs_table, .. } => self.mcs_tables.get(mcs_table),
            ModulationConfig::Fixed { .. } => None,
        };
        let selector = self.selectors.entry(link.link_id.clone()).or_insert_with(McsSelector::new);
        let (entry, selection) = select_mcs_entry(modulation, table, selector, sinr.sinr_db, link.rx.config.bandwidth_hz())?;

        let outcome = outcomes.get_mut(&link.link_id).expect("caller only invokes this for links already in the map");
        outcome.netem = derive_netem(&entry, selection.evaluated_snr_db, link.rx.config.packet_size_bits, &outcome.channel, &default_jitter_policy());
        outcome.mcs = selection;
        outcome.sinr = Some(sinr.clone());
        Ok(())
    }

    /// Drives tc for every link that has a fresh outcome: shared-bridge
    /// links are grouped by source interface and applied as one hierarchy
    /// per group, point-to-point links are applied individually (spec §4.8
    /// step 8, §5 "serial within one namespace").
    async fn apply_all(&self, links: &[DirectionalLink], outcomes: &HashMap<LinkId, LinkOutcome>) -> Vec<LinkWarning> {
        let mut warnings = Vec::new();

        if self.topology.shared_bridge_enabled() {
            let mut groups: HashMap<(String, String), Vec<&DirectionalLink>> = HashMap::new();
            for link in links {
                if outcomes.contains_key(&link.link_id) {
                    groups.entry((link.tx.node.clone(), link.tx.interface.clone())).or_default().push(link);
                }
            }

            for ((node, iface), group_links) in groups {
                let namespace = match self.namespaces.get(&node, &iface) {
                    Ok(ns) => ns.clone(),
                    Err(e) => {
                        for l in &group_links {
                            warnings.push(LinkWarning::tc(l.link_id.clone(), e.to_string()));
                        }
                        continue;
                    }
                };

                let mut destinations = Vec::with_capacity(group_links.len());
                for (i, link) in group_links.iter().enumerate() {
                    let outcome = &outcomes[&link.link_id];
                    let dest_ip = link.rx.config.ip_address.clone().unwrap_or_default();
                    destinations.push(BridgeDestination {
                        class_id: 10 + (i as u32) * 10,
                        dest_ip,
                        htb: HtbConfig::from_rate_mbps(outcome.netem.rate_mbps),
                        netem: NetemConfig::from(outcome.netem),
                    });
                }

                // Broadcast/unmatched traffic on a shared medium isn't modeled per
                // destination; it passes through unimpaired rather than inheriting
                // any one peer's parameters.
                let broadcast_default = NetemConfig { delay_us: 0, jitter_us: 0, loss_percent: 0.0 };

                let started = Instant::now();
                let result = wn_tc::apply_shared_bridge(&self.tc, &namespace, &iface, broadcast_default, &destinations).await;
                wn_observability::record_tc_apply(started.elapsed());
                if let Err(e) = result {
                    for l in &group_links {
                        warnings.push(LinkWarning::tc(l.link_id.clone(), e.to_string()));
                    }
                }
            }
        } else {
            for link in links {
                let Some(outcome) = outcomes.get(&link.link_id) else { continue };
                let namespace = match self.namespaces.get(&link.tx.node, &link.tx.interface) {
                    Ok(ns) => ns.clone(),
                    Err(e) => {
                        warnings.push(LinkWarning::tc(link.link_id.clone(), e.to_string()));
                        continue;
                    }
                };

                let netem = NetemConfig::from(outcome.netem);
                let tbf = TbfConfig::from_rate_mbps(outcome.netem.rate_mbps);
                let started = Instant::now();
                let result = wn_tc::apply_point_to_point(&self.tc, &namespace, &link.tx.interface, netem, tbf).await;
                wn_observability::record_tc_apply(started.elapsed());
                if let Err(e) = result {
                    warnings.push(LinkWarning::tc(link.link_id.clone(), e.to_string()));
                }
            }
        }

        warnings
    }
}

/// Degenerate outcome synthesized for a link whose deploy-time compute
/// failed outright: maximum loss, minimum viable rate, no SINR (spec §7
/// `channel_error`/`transport_error` at deploy).
fn degenerate_outcome(link: &DirectionalLink) -> LinkOutcome {
    LinkOutcome {
        link_id: link.link_id.clone(),
        channel: ChannelResult::degenerate(0.0),
        sinr: None,
        mcs: McsSelection { index: 0, min_snr_db: f64::NEG_INFINITY, evaluated_snr_db: f64::NEG_INFINITY },
        netem: NetemParams::degenerate(),
    }
}

async fn compute_batch_concurrent(channel: &ChannelServiceClient, requests: Vec<LinkRequest>) -> Vec<(LinkId, Result<LinkOutcome, ClientError>)> {
    stream::iter(requests.into_iter().map(|req| {
        let channel = channel.clone();
        async move {
            let link_id = req.link_id.clone();
            let result = channel.compute_single(&req).await;
            (link_id, result)
        }
    }))
    .buffer_unordered(COMPUTE_CONCURRENCY)
    .collect()
    .await
}

async fn compute_sinr_concurrent(channel: &ChannelServiceClient, requests: Vec<(LinkId, SinrRequest)>) -> HashMap<LinkId, Result<SinrResult, ClientError>> {
    stream::iter(requests.into_iter().map(|(id, req)| {
        let channel = channel.clone();
        async move { (id, channel.compute_sinr(&req).await) }
    }))
    .buffer_unordered(COMPUTE_CONCURRENCY)
    .collect::<Vec<_>>()
    .await
    .into_iter()
    .collect()
}
