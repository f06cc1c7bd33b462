//! Composes the per-module formulas into the two link-budget steps shared
//! by the channel service (plain SNR) and the controller (SINR override):
//! pick an MCS entry, then derive netem parameters from it. Kept here
//! rather than in either caller so both apply identical hysteresis and
//! rate math (spec §4.1, §4.8 step 6).

use wn_types::{ChannelResult, McsEntry, McsSelection, McsTable, Modulation, ModulationConfig, NetemParams};

use crate::ber::ber;
use crate::coding::coding_gain_db;
use crate::error_rate::per;
use crate::jitter::JitterPolicy;
use crate::mcs_select::McsSelector;
use crate::rate::effective_rate_mbps;

#[derive(Debug, thiserror::Error)]
pub enum LinkOutcomeError {
    #[error("adaptive modulation references MCS table '{0}' which was not registered")]
    MissingMcsTable(String),
}

/// Picks the `McsEntry` in effect for this evaluation: the fixed entry when
/// modulation is pinned, or the hysteresis-gated adaptive pick against
/// `table` and the link's persistent `selector` state.
pub fn select_mcs_entry(
    modulation: &ModulationConfig,
    table: Option<&McsTable>,
    selector: &mut McsSelector,
    snr_db: f64,
    bandwidth_hz: f64,
) -> Result<(McsEntry, McsSelection), LinkOutcomeError> {
    match modulation {
        ModulationConfig::Fixed { modulation, fec_code_rate, fec_type } => {
            let entry = McsEntry {
                index: 0,
                modulation: *modulation,
                code_rate: *fec_code_rate,
                min_snr_db: f64::NEG_INFINITY,
                fec_type: *fec_type,
                bandwidth_mhz: bandwidth_hz / 1.0e6,
                spreading_factor: None,
            };
            let selection = McsSelection { index: entry.index, min_snr_db: entry.min_snr_db, evaluated_snr_db: snr_db };
            Ok((entry, selection))
        }
        ModulationConfig::Adaptive { mcs_table, mcs_hysteresis_db } => {
            let table = table.ok_or_else(|| LinkOutcomeError::MissingMcsTable(mcs_table.clone()))?;
            let selection = selector.select(table, snr_db, *mcs_hysteresis_db);
            let entry = *table.by_index(selection.index).expect("selector only returns indices present in the table");
            Ok((entry, selection))
        }
    }
}

/// Lower bound so a degenerate packet error rate never produces a zero or
/// negative rate, which `NetemParams::new` rejects (spec: `rate_mbps > 0`).
const MIN_RATE_MBPS: f64 = 0.001;

/// `bits_per_symbol / 12` (the widest constellation in the built-in tables)
/// as the jitter policy's robustness input: higher-order, more fragile
/// modulations get a larger factor and therefore a wider jitter envelope.
fn fragility_factor(modulation: Modulation) -> f64 {
    (modulation.bits_per_symbol() / 12.0).clamp(0.0, 1.0)
}

/// Derives netem parameters from a chosen MCS entry and the evaluated
/// SNR/SINR (spec §4.1: coding gain -> BER -> PER -> rate; strongest-path
/// delay -> delay; RMS delay spread + MCS fragility -> jitter).
pub fn derive_netem(entry: &McsEntry, snr_db: f64, packet_size_bits: u64, channel: &ChannelResult, jitter_policy: &dyn JitterPolicy) -> NetemParams {
    let coding_gain = coding_gain_db(entry.fec_type, entry.code_rate);
    let snr_linear = 10f64.powf((snr_db + coding_gain) / 10.0);
    let ber_value = ber(entry.modulation, snr_linear);
    let per_value = per(ber_value, packet_size_bits);

    let rate_mbps = effective_rate_mbps(entry, per_value).max(MIN_RATE_MBPS);
    let delay_ms = (channel.strongest_path_delay_ns / 1.0e6).max(0.0);
    let jitter_ms = jitter_policy.jitter_ms(channel.delay_spread_ns, fragility_factor(entry.modulation), delay_ms);
    let loss_percent = (per_value * 100.0).clamp(0.0, 100.0);

    NetemParams::new(delay_ms, jitter_ms, loss_percent, rate_mbps).unwrap_or_else(|_| NetemParams::degenerate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::default_jitter_policy;
    use wn_types::mcs::presets::wifi6_80mhz;
    use wn_types::{DominantPath, FecType};

    fn channel(distance_m: f64, delay_ns: f64) -> ChannelResult {
        ChannelResult {
            path_loss_db: 72.76,
            delay_spread_ns: 0.0,
            dominant_path: DominantPath::Los,
            distance_m,
            strongest_path_power_db: -72.76,
            strongest_path_delay_ns: delay_ns,
            num_paths: 1,
            paths: Vec::new(),
        }
    }

    #[test]
    fn fixed_modulation_always_selects_the_pinned_entry() {
        let modulation = ModulationConfig::Fixed { modulation: Modulation::Qam64, fec_code_rate: 0.5, fec_type: FecType::Ldpc };
        let mut selector = McsSelector::new();
        let (entry, selection) = select_mcs_entry(&modulation, None, &mut selector, 35.0, 80.0e6).unwrap();
        assert_eq!(entry.modulation, Modulation::Qam64);
        assert_eq!(selection.evaluated_snr_db, 35.0);
    }

    #[test]
    fn adaptive_modulation_without_a_registered_table_is_an_error() {
        let modulation = ModulationConfig::Adaptive { mcs_table: "wifi6_80mhz".into(), mcs_hysteresis_db: 2.0 };
        let mut selector = McsSelector::new();
        let result = select_mcs_entry(&modulation, None, &mut selector, 22.0, 80.0e6);
        assert!(matches!(result, Err(LinkOutcomeError::MissingMcsTable(_))));
    }

    #[test]
    fn scenario_1_matches_spec_order_of_magnitude() {
        let modulation = ModulationConfig::Fixed { modulation: Modulation::Qam64, fec_code_rate: 0.5, fec_type: FecType::Ldpc };
        let mut selector = McsSelector::new();
        let (entry, _) = select_mcs_entry(&modulation, None, &mut selector, 35.0, 80.0e6).unwrap();
        let netem = derive_netem(&entry, 35.0, 12_000, &channel(20.0, 66.7), &default_jitter_policy());
        assert!((netem.rate_mbps - 192.0).abs() / 192.0 < 0.05, "got {}", netem.rate_mbps);
        assert!(netem.loss_percent < 1.0);
    }

    #[test]
    fn adaptive_hysteresis_sequence_matches_selector_behavior() {
        let table = wifi6_80mhz();
        let modulation = ModulationConfig::Adaptive { mcs_table: "wifi6_80mhz".into(), mcs_hysteresis_db: 2.0 };
        let mut selector = McsSelector::new();
        let snrs = [22.0, 25.0, 24.0, 22.0, 19.0, 22.0];
        let indices: Vec<u32> = snrs
            .iter()
            .map(|&s| select_mcs_entry(&modulation, Some(&table), &mut selector, s, 80.0e6).unwrap().1.index)
            .collect();
        assert_eq!(indices, vec![7, 7, 7, 7, 6, 6]);
    }
}
