use wn_types::{SlotAssignment, SlotAssignmentMode, TdmaParams};

/// Statistical TDMA model: derives `tx_probability` for a `(receiver,
/// interferer)` pair from their slot assignments within the shared frame.
#[derive(Debug, Clone)]
pub struct TdmaModel;

impl TdmaModel {
    pub fn new() -> Self {
        Self
    }

    /// `receiver` and `interferer` are each interface's own `TdmaParams`.
    /// `fixed`/`round_robin` modes are deterministic: orthogonal slot sets
    /// produce an exact zero, any overlap produces a certain one.
    /// `random`/`distributed` modes treat ownership as independent and
    /// multiply the two ownership probabilities.
    pub fn tx_probability(&self, receiver: &TdmaParams, interferer: &TdmaParams) -> f64 {
        match interferer.mode {
            SlotAssignmentMode::Fixed | SlotAssignmentMode::RoundRobin => {
                match (&receiver.assignment, &interferer.assignment) {
                    (SlotAssignment::Explicit(rx_slots), SlotAssignment::Explicit(tx_slots)) => {
                        if tx_slots.iter().any(|slot| rx_slots.contains(slot)) {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    _ => 1.0,
                }
            }
            SlotAssignmentMode::Random | SlotAssignmentMode::Distributed => {
                match (&receiver.assignment, &interferer.assignment) {
                    (SlotAssignment::OwnershipProbability(rx_p), SlotAssignment::OwnershipProbability(tx_p)) => {
                        (rx_p * tx_p).clamp(0.0, 1.0)
                    }
                    _ => 0.0,
                }
            }
        }
    }
}

impl Default for TdmaModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(slots: Vec<u32>) -> TdmaParams {
        TdmaParams { frame_duration_ms: 10.0, num_slots: 4, mode: SlotAssignmentMode::Fixed, assignment: SlotAssignment::Explicit(slots) }
    }

    fn distributed(p: f64) -> TdmaParams {
        TdmaParams { frame_duration_ms: 10.0, num_slots: 4, mode: SlotAssignmentMode::Distributed, assignment: SlotAssignment::OwnershipProbability(p) }
    }

    #[test]
    fn orthogonal_fixed_slots_produce_exact_zero() {
        let model = TdmaModel::new();
        let rx = fixed(vec![0, 1]);
        let tx = fixed(vec![2, 3]);
        assert_eq!(model.tx_probability(&rx, &tx), 0.0);
    }

    #[test]
    fn overlapping_fixed_slots_produce_exact_one() {
        let model = TdmaModel::new();
        let rx = fixed(vec![0, 1]);
        let tx = fixed(vec![1, 2]);
        assert_eq!(model.tx_probability(&rx, &tx), 1.0);
    }

    #[test]
    fn distributed_ownership_multiplies_probabilities() {
        let model = TdmaModel::new();
        let rx = distributed(0.5);
        let tx = distributed(0.4);
        assert!((model.tx_probability(&rx, &tx) - 0.2).abs() < 1e-9);
    }
}
