//! Top-level controller errors (fatal at deploy/destroy) and the link-level
//! warning shape used when a single link fails without aborting the rest of
//! a multi-link compute (spec §7 propagation policy).

use serde::Serialize;
use wn_types::{LinkId, TopologyError};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("topology_error: {0}")]
    Topology(#[from] TopologyError),

    #[error("runtime_error: {0}")]
    Adapter(#[from] wn_adapter::AdapterError),

    /// Covers both scene loads and MCS table registration: both are a
    /// request to the channel service made fatal by happening before any
    /// link has been applied.
    #[error("channel_error: {0}")]
    Channel(#[from] wn_channel_service::ClientError),

    #[error("tc_error: {0}")]
    Tc(#[from] wn_tc::TcError),

    #[error("topology_error: interface references unregistered mcs_table '{0}'")]
    UnknownMcsPreset(String),

    #[error("topology_error: unknown node or interface '{0}'")]
    UnknownNode(String),

    #[error("runtime_error: topology is not currently deployed")]
    NotDeployed,
}

/// One link's failure, reported alongside a deployment or mobility update
/// rather than aborting it (spec §7: "Link-level errors never abort a
/// multi-link compute").
#[derive(Debug, Clone, Serialize)]
pub struct LinkWarning {
    pub link_id: LinkId,
    pub classification: &'static str,
    pub message: String,
}

impl LinkWarning {
    pub fn channel(link_id: LinkId, message: impl Into<String>) -> Self {
        Self { link_id, classification: "channel_error", message: message.into() }
    }

    pub fn sinr(link_id: LinkId, message: impl Into<String>) -> Self {
        Self { link_id, classification: "sinr_error", message: message.into() }
    }

    pub fn tc(link_id: LinkId, message: impl Into<String>) -> Self {
        Self { link_id, classification: "tc_error", message: message.into() }
    }

    pub fn transport(link_id: LinkId, message: impl Into<String>) -> Self {
        Self { link_id, classification: "transport_error", message: message.into() }
    }
}
