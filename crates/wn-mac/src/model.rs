use crate::csma::CsmaModel;
use crate::tdma::TdmaModel;
use wn_types::{MacConfig, TdmaParams};

#[derive(Debug, thiserror::Error)]
pub enum MacModelError {
    #[error("MAC context kind does not match the model's configured kind")]
    MismatchedContext,
}

/// Context needed to derive `tx_probability` for one `(receiver,
/// interferer)` pair; which variant is required depends on the model kind,
/// since CSMA and TDMA consult entirely different inputs.
pub enum MacContext<'a> {
    Csma { interferer_power_at_receiver_dbm: f64, rx_sensitivity_dbm: f64 },
    Tdma { receiver: &'a TdmaParams, interferer: &'a TdmaParams },
}

/// Dispatches to the interface's configured MAC model. A closed sum type
/// rather than a trait object: the set of MAC models is fixed by the data
/// model (spec §9), and a match keeps the two statistical models'
/// divergent input shapes explicit at the call site.
pub enum MacModel {
    Csma(CsmaModel),
    Tdma(TdmaModel),
}

impl MacModel {
    pub fn from_config(config: &MacConfig) -> Self {
        match config {
            MacConfig::Csma(params) => MacModel::Csma(CsmaModel::new(*params)),
            MacConfig::Tdma(_) => MacModel::Tdma(TdmaModel::new()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MacModel::Csma(_) => "csma",
            MacModel::Tdma(_) => "tdma",
        }
    }

    pub fn tx_probability(&self, context: MacContext<'_>) -> Result<f64, MacModelError> {
        match (self, context) {
            (MacModel::Csma(model), MacContext::Csma { interferer_power_at_receiver_dbm, rx_sensitivity_dbm }) => {
                Ok(model.tx_probability(interferer_power_at_receiver_dbm, rx_sensitivity_dbm))
            }
            (MacModel::Tdma(model), MacContext::Tdma { receiver, interferer }) => Ok(model.tx_probability(receiver, interferer)),
            _ => Err(MacModelError::MismatchedContext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_types::{CsmaParams, SlotAssignment, SlotAssignmentMode};

    #[test]
    fn csma_config_dispatches_to_csma_model() {
        let model = MacModel::from_config(&MacConfig::Csma(CsmaParams::default()));
        assert_eq!(model.kind(), "csma");
        let p = model
            .tx_probability(MacContext::Csma { interferer_power_at_receiver_dbm: -120.0, rx_sensitivity_dbm: -82.0 })
            .unwrap();
        assert_eq!(p, 0.3);
    }

    #[test]
    fn mismatched_context_is_rejected() {
        let model = MacModel::from_config(&MacConfig::Csma(CsmaParams::default()));
        let tdma_params =
            TdmaParams { frame_duration_ms: 10.0, num_slots: 2, mode: SlotAssignmentMode::Fixed, assignment: SlotAssignment::Explicit(vec![0]) };
        let result = model.tx_probability(MacContext::Tdma { receiver: &tdma_params, interferer: &tdma_params });
        assert!(result.is_err());
    }
}
