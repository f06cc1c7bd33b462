//! Glue between the channel engine, link-budget math, interference engine
//! and MAC models: the per-request compute each API handler drives.

use wn_channel::PathRequest;
use wn_interference::InterfererInput;
use wn_linkbudget::{default_jitter_policy, derive_netem, noise_floor_dbm, rx_power_free_space_dbm, rx_power_ray_traced_dbm, select_mcs_entry, LinkOutcomeError, McsSelector};
use wn_mac::{MacContext, MacModel};
use wn_types::{ChannelResult, EndpointRequest, LinkOutcome, LinkRequest, MacConfig, McsSelection, ModulationConfig, SinrRequest, SinrResult};

use crate::error::ServiceError;
use crate::state::{CachedLink, ServiceState};

/// Computes the directional channel between `tx` and `rx` using the
/// receiver's carrier frequency (spec: "using the receiver's carrier
/// frequency for the RF computation"), and reports whether a scene was
/// loaded for that frequency (so the caller can pick the matching
/// received-power formula).
async fn compute_channel(state: &ServiceState, tx: &EndpointRequest, rx: &EndpointRequest) -> Result<(ChannelResult, bool), ServiceError> {
    let frequency_hz = rx.frequency_hz as u64;
    let path_request = PathRequest {
        tx_position: tx.position,
        tx_antenna: tx.antenna.clone(),
        rx_position: rx.position,
        rx_antenna: rx.antenna.clone(),
    };
    let mut engine = state.engine().lock().await;
    let ray_traced = engine.scenes().is_loaded(frequency_hz);
    let channel = engine.compute(frequency_hz, &path_request).await?;
    Ok((channel, ray_traced))
}

fn received_power_dbm(tx: &EndpointRequest, rx: &EndpointRequest, channel: &ChannelResult, ray_traced: bool) -> f64 {
    if ray_traced {
        rx_power_ray_traced_dbm(tx.rf_power_dbm, channel.path_loss_db)
    } else {
        rx_power_free_space_dbm(
            tx.rf_power_dbm,
            tx.antenna.free_space_gain_dbi(),
            rx.antenna.free_space_gain_dbi(),
            channel.distance_m,
            rx.frequency_hz,
        )
    }
}

fn degenerate_outcome(link_id: &str, channel: ChannelResult, snr_db: f64) -> LinkOutcome {
    LinkOutcome {
        link_id: link_id.to_string(),
        channel,
        sinr: None,
        mcs: McsSelection { index: 0, min_snr_db: f64::NEG_INFINITY, evaluated_snr_db: snr_db },
        netem: wn_types::NetemParams::degenerate(),
    }
}

/// Computes one directional link end to end: channel, SNR, MCS selection
/// with hysteresis, derived netem parameters. Records the device positions
/// and path cache entry as a side effect (spec §4.5).
pub async fn compute_link_outcome(state: &ServiceState, request: &LinkRequest) -> Result<LinkOutcome, ServiceError> {
    let (channel, ray_traced) = compute_channel(state, &request.tx, &request.rx).await?;

    state.record_position(&request.tx.node, &request.tx.interface, request.tx.position);
    state.record_position(&request.rx.node, &request.rx.interface, request.rx.position);
    state.cache_link(
        request.link_id.clone(),
        CachedLink {
            tx_position: request.tx.position,
            rx_position: request.rx.position,
            distance_m: channel.distance_m,
            delay_spread_ns: channel.delay_spread_ns,
            paths: channel.paths.clone(),
        },
    );

    let rx_power_dbm = received_power_dbm(&request.tx, &request.rx, &channel, ray_traced);
    let noise_dbm = noise_floor_dbm(request.rx.bandwidth_hz, request.rx.noise_figure_db);
    let snr_db = rx_power_dbm - noise_dbm;

    if rx_power_dbm < request.rx.rx_sensitivity_dbm {
        return Ok(degenerate_outcome(&request.link_id, ChannelResult::degenerate(channel.distance_m), snr_db));
    }

    let (entry, selection) = select_mcs_pair(state, &request.link_id, &request.modulation, snr_db, request.rx.bandwidth_hz)?;
    let netem = derive_netem(&entry, selection.evaluated_snr_db, request.packet_size_bits, &channel, &default_jitter_policy());

    Ok(LinkOutcome { link_id: request.link_id.clone(), channel, sinr: None, mcs: selection, netem })
}

/// Resolves the MCS table for adaptive modulation (if any) and runs the
/// per-link hysteresis selector, creating one on first use.
fn select_mcs_pair(
    state: &ServiceState,
    link_id: &str,
    modulation: &ModulationConfig,
    snr_db: f64,
    bandwidth_hz: f64,
) -> Result<(wn_types::McsEntry, McsSelection), ServiceError> {
    let table_guard = match modulation {
        ModulationConfig::Adaptive { mcs_table, .. } => Some(
            state
                .mcs_tables()
                .get(mcs_table)
                .ok_or_else(|| ServiceError::McsTable(LinkOutcomeError::MissingMcsTable(mcs_table.clone())))?,
        ),
        ModulationConfig::Fixed { .. } => None,
    };
    let table_ref = table_guard.as_deref();

    let mut selector = state.mcs_selectors().entry(link_id.to_string()).or_insert_with(McsSelector::new);
    Ok(select_mcs_entry(modulation, table_ref, &mut selector, snr_db, bandwidth_hz)?)
}

/// Computes SINR for a link against its candidate interferers: per
/// interferer, the channel loss to the receiver (at the receiver's carrier
/// frequency), ACLR-adjusted power, and a MAC-derived transmission
/// probability, summed in the linear domain by the interference engine.
pub async fn compute_sinr(state: &ServiceState, request: &SinrRequest) -> Result<SinrResult, ServiceError> {
    let link = &request.link;
    let (_channel, ray_traced) = compute_channel(state, &link.tx, &link.rx).await?;
    let signal_power_dbm = received_power_dbm(&link.tx, &link.rx, &_channel, ray_traced);
    let noise_dbm = noise_floor_dbm(link.rx.bandwidth_hz, link.rx.noise_figure_db);

    let mut inputs = Vec::with_capacity(request.interferers.len());
    for interferer in &request.interferers {
        let (interferer_channel, interferer_ray_traced) = compute_channel(state, &interferer.tx, &link.rx).await?;
        let raw_power_dbm = received_power_dbm(&interferer.tx, &link.rx, &interferer_channel, interferer_ray_traced);
        let frequency_separation_hz = (interferer.tx.frequency_hz - link.rx.frequency_hz).abs();

        // The transmission-state map is the eventually-consistent override on
        // top of the request's declared is_active (spec §5: "readers are SINR
        // computations"); a flag flipped via /transmission/state since the
        // caller built this request still wins.
        let is_active = interferer.is_active && state.is_active(&interferer.interferer_id);

        let tx_probability = if !is_active {
            0.0
        } else {
            match &link.mac {
                None => 1.0,
                Some(mac_config @ MacConfig::Csma(_)) => {
                    let context = MacContext::Csma { interferer_power_at_receiver_dbm: raw_power_dbm, rx_sensitivity_dbm: link.rx.rx_sensitivity_dbm };
                    MacModel::from_config(mac_config).tx_probability(context)?
                }
                Some(mac_config @ MacConfig::Tdma(rx_params)) => match &interferer.mac {
                    Some(MacConfig::Tdma(tx_params)) => {
                        MacModel::from_config(mac_config).tx_probability(MacContext::Tdma { receiver: rx_params, interferer: tx_params })?
                    }
                    _ => return Err(ServiceError::InterfererMacMismatch(interferer.interferer_id.clone())),
                },
            }
        };

        inputs.push(InterfererInput {
            interferer_id: interferer.interferer_id.clone(),
            raw_power_dbm,
            frequency_separation_hz,
            tx_probability,
        });
    }

    Ok(wn_interference::compute_sinr(signal_power_dbm, noise_dbm, link.rx.rx_sensitivity_dbm, &inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_types::mcs::presets::wifi6_80mhz;

    #[test]
    fn fixed_modulation_does_not_touch_the_table_registry() {
        let state = ServiceState::new("unused-worker-binary");
        let modulation = ModulationConfig::Fixed { modulation: wn_types::Modulation::Qam64, fec_code_rate: 0.75, fec_type: wn_types::FecType::Ldpc };
        let (entry, selection) = select_mcs_pair(&state, "a->b", &modulation, 20.0, 80.0e6).expect("fixed selection always succeeds");
        assert_eq!(entry.index, 0);
        assert_eq!(selection.evaluated_snr_db, 20.0);
    }

    #[test]
    fn adaptive_modulation_needs_a_registered_table() {
        let state = ServiceState::new("unused-worker-binary");
        let modulation = ModulationConfig::Adaptive { mcs_table: "wifi6_80mhz".to_string(), mcs_hysteresis_db: 2.0 };
        assert!(select_mcs_pair(&state, "a->b", &modulation, 20.0, 80.0e6).is_err());

        state.mcs_tables().insert("wifi6_80mhz".to_string(), wifi6_80mhz());
        let (_entry, selection) = select_mcs_pair(&state, "a->b", &modulation, 20.0, 80.0e6).expect("table now registered");
        assert_eq!(selection.evaluated_snr_db, 20.0);
    }
}
