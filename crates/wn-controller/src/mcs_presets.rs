//! Resolves the `mcs_table` name an adaptive-modulation interface references
//! in the topology to an actual table. The topology descriptor (spec §6)
//! only carries the name, not the table's rows, so the controller is the
//! owner of the small catalog of built-in tables: it registers the
//! resolved table with the channel service at deploy time (`POST
//! /mcs_table/register`) and keeps its own copy to re-derive MCS locally
//! when overriding SNR with SINR (spec §4.8 step 5) without a second round
//! trip through the registry.

use wn_types::mcs::presets;
use wn_types::McsTable;

pub fn resolve(name: &str) -> Option<McsTable> {
    match name {
        "wifi6_80mhz" => Some(presets::wifi6_80mhz()),
        "narrowband_spread" => Some(presets::narrowband_spread()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_presets() {
        assert!(resolve("wifi6_80mhz").is_some());
        assert!(resolve("narrowband_spread").is_some());
        assert!(resolve("unknown").is_none());
    }
}
