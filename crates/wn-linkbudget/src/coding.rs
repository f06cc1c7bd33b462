use wn_types::FecType;

/// Reference code rate the empirical coding-gain constants were measured at.
const REFERENCE_CODE_RATE: f64 = 0.5;

/// Additive SNR offset (dB) applied before computing BER. Deviations from
/// rate-1/2 scale the base gain by a smooth factor rather than a cliff —
/// codes closer to rate-1 have less room to correct and so contribute less
/// gain. These constants are empirical, not derived from the Shannon limit;
/// callers must not assume Shannon-limit behavior (see spec §4.1).
pub fn coding_gain_db(fec_type: FecType, code_rate: f64) -> f64 {
    let base = fec_type.base_coding_gain_db();
    let rate = code_rate.clamp(0.05, 0.999);
    let scale = (1.0 - rate).sqrt() / (1.0 - REFERENCE_CODE_RATE).sqrt();
    base * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fec_contributes_nothing() {
        assert_eq!(coding_gain_db(FecType::None, 0.5), 0.0);
    }

    #[test]
    fn reference_rate_returns_base_gain() {
        let g = coding_gain_db(FecType::Ldpc, 0.5);
        assert!((g - 6.5).abs() < 1e-9);
    }

    #[test]
    fn higher_code_rate_reduces_gain() {
        let half = coding_gain_db(FecType::Ldpc, 0.5);
        let five_sixths = coding_gain_db(FecType::Ldpc, 5.0 / 6.0);
        assert!(five_sixths < half);
    }
}
