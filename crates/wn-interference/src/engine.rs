use crate::aclr;
use wn_types::{InterferenceContribution, SinrResult};

/// One candidate interferer's raw contribution at the receiver, before ACLR
/// and MAC weighting: the channel-engine result against this interferer's
/// geometry, already reduced to received power.
#[derive(Debug, Clone)]
pub struct InterfererInput {
    pub interferer_id: String,
    pub raw_power_dbm: f64,
    pub frequency_separation_hz: f64,
    /// Probability this interferer is actually transmitting during the
    /// window of interest, from the MAC model (§4.4). `0.0` removes its
    /// contribution entirely without dropping it from consideration.
    pub tx_probability: f64,
}

fn dbm_to_linear(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0)
}

fn linear_to_dbm(linear: f64) -> f64 {
    10.0 * linear.max(1.0e-30).log10()
}

/// Aggregates interference at one receiver and derives SINR, per spec
/// §4.3: ACLR rejection, sensitivity filtering, MAC transmission
/// probability weighting, then linear-domain summation.
pub fn compute_sinr(
    signal_power_dbm: f64,
    noise_floor_dbm: f64,
    rx_sensitivity_dbm: f64,
    interferers: &[InterfererInput],
) -> SinrResult {
    let mut contributions = Vec::new();
    let mut interference_linear = 0.0;
    let mut active_interferer_count = 0u32;

    for interferer in interferers {
        let aclr_db = aclr::aclr_db(interferer.frequency_separation_hz);
        let effective_power_dbm = interferer.raw_power_dbm - aclr_db;
        if effective_power_dbm < rx_sensitivity_dbm {
            continue;
        }

        let tx_probability = interferer.tx_probability.clamp(0.0, 1.0);
        let contribution_linear = dbm_to_linear(effective_power_dbm) * tx_probability;
        if tx_probability > 0.0 {
            active_interferer_count += 1;
        }
        interference_linear += contribution_linear;

        contributions.push(InterferenceContribution {
            interferer_id: interferer.interferer_id.clone(),
            raw_power_dbm: interferer.raw_power_dbm,
            frequency_separation_hz: interferer.frequency_separation_hz,
            aclr_db,
            effective_power_dbm,
            tx_probability,
        });
    }

    let noise_linear = dbm_to_linear(noise_floor_dbm);
    let sinr_db = signal_power_dbm - linear_to_dbm(noise_linear + interference_linear);

    SinrResult {
        signal_power_dbm,
        noise_floor_dbm,
        interference_power_dbm: linear_to_dbm(interference_linear),
        sinr_db,
        active_interferer_count,
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_interferers_reduces_to_plain_snr() {
        let result = compute_sinr(-60.0, -90.0, -95.0, &[]);
        assert!((result.sinr_db - 30.0).abs() < 1e-6);
        assert_eq!(result.active_interferer_count, 0);
    }

    #[test]
    fn zero_tx_probability_contributes_nothing() {
        let interferers = vec![InterfererInput {
            interferer_id: "b".into(),
            raw_power_dbm: -40.0,
            frequency_separation_hz: 0.0,
            tx_probability: 0.0,
        }];
        let result = compute_sinr(-60.0, -90.0, -95.0, &interferers);
        assert!((result.sinr_db - 30.0).abs() < 1e-6);
        assert_eq!(result.active_interferer_count, 0);
        assert_eq!(result.contributions.len(), 1);
    }

    #[test]
    fn strong_co_channel_interferer_degrades_sinr() {
        let interferers = vec![InterfererInput {
            interferer_id: "b".into(),
            raw_power_dbm: -50.0,
            frequency_separation_hz: 0.0,
            tx_probability: 1.0,
        }];
        let result = compute_sinr(-60.0, -90.0, -95.0, &interferers);
        assert!(result.sinr_db < 30.0);
        assert_eq!(result.active_interferer_count, 1);
    }

    #[test]
    fn below_sensitivity_interferer_is_filtered_out() {
        let interferers = vec![InterfererInput {
            interferer_id: "b".into(),
            raw_power_dbm: -200.0,
            frequency_separation_hz: 0.0,
            tx_probability: 1.0,
        }];
        let result = compute_sinr(-60.0, -90.0, -95.0, &interferers);
        assert!(result.contributions.is_empty());
    }
}
