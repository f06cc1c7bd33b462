//! The deployment summary emitted at the end of the lifecycle (spec §4.8
//! step 9): one entry per directional link plus whatever link-level
//! warnings were collected along the way.

use serde::Serialize;
use tracing::info;
use wn_types::LinkOutcome;

use crate::error::LinkWarning;

#[derive(Debug, Clone, Serialize)]
pub struct DeploymentSummary {
    pub topology_name: String,
    pub links: Vec<LinkOutcome>,
    pub warnings: Vec<LinkWarning>,
}

impl DeploymentSummary {
    pub fn log(&self) {
        info!(topology = %self.topology_name, links = self.links.len(), warnings = self.warnings.len(), "deployment summary");
        for link in &self.links {
            info!(
                link_id = %link.link_id,
                mcs_index = link.mcs.index,
                snr_db = link.mcs.evaluated_snr_db,
                sinr_db = link.sinr.as_ref().map(|s| s.sinr_db),
                delay_ms = link.netem.delay_ms,
                jitter_ms = link.netem.jitter_ms,
                loss_percent = link.netem.loss_percent,
                rate_mbps = link.netem.rate_mbps,
                "link applied"
            );
        }
        for w in &self.warnings {
            wn_observability::classify_and_log(&w.link_id, w.classification, &w.message);
        }
    }
}
