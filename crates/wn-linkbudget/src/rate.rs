use wn_types::McsEntry;

/// Product of ~94% symbol efficiency and ~85% protocol efficiency for a
/// representative 802.11ax-style configuration. Documented as empirical,
/// not derived per-waveform.
pub const OFDM_EFFICIENCY: f64 = 0.8;

/// Effective throughput in Mbps for one MCS entry at a given packet error
/// rate: `BW_Hz * bits_per_symbol * code_rate * OFDM_efficiency * (1 - PER) / 1e6`.
/// Spread-spectrum entries (non-`None` spreading factor) divide by the
/// spreading factor.
pub fn effective_rate_mbps(entry: &McsEntry, per: f64) -> f64 {
    let bw_hz = entry.bandwidth_mhz * 1.0e6;
    let per = per.clamp(0.0, 1.0);
    let mut rate = bw_hz * entry.modulation.bits_per_symbol() * entry.code_rate * OFDM_EFFICIENCY * (1.0 - per) / 1.0e6;
    if let Some(sf) = entry.spreading_factor {
        rate /= sf.max(1.0);
    }
    rate.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_types::{FecType, Modulation};

    fn qam64_half() -> McsEntry {
        McsEntry {
            index: 5,
            modulation: Modulation::Qam64,
            code_rate: 0.5,
            min_snr_db: 16.0,
            fec_type: FecType::Ldpc,
            bandwidth_mhz: 80.0,
            spreading_factor: None,
        }
    }

    #[test]
    fn rate_is_zero_when_per_is_one() {
        assert_eq!(effective_rate_mbps(&qam64_half(), 1.0), 0.0);
    }

    #[test]
    fn rate_matches_spec_scenario_1_order_of_magnitude() {
        // spec scenario 1: 64-QAM rate-1/2, 80 MHz, PER ~ 0 -> ~192 Mbps +/- 5%
        let rate = effective_rate_mbps(&qam64_half(), 0.0);
        assert!((rate - 192.0).abs() / 192.0 < 0.05, "got {rate}");
    }

    #[test]
    fn spreading_factor_divides_rate() {
        let mut entry = qam64_half();
        entry.spreading_factor = Some(4.0);
        let spread = effective_rate_mbps(&entry, 0.0);
        let unspread = {
            entry.spreading_factor = None;
            effective_rate_mbps(&entry, 0.0)
        };
        assert!((spread - unspread / 4.0).abs() < 1e-9);
    }
}
