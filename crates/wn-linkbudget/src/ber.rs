use wn_types::Modulation;

/// Gaussian tail function `Q(x) = 0.5 * erfc(x / sqrt(2))`.
pub fn q_function(x: f64) -> f64 {
    0.5 * libm::erfc(x / std::f64::consts::SQRT_2)
}

/// Closed-form AWGN bit-error-rate approximation for one modulation, given
/// *linear* (not dB) SNR already including any coding gain offset.
///
/// BPSK uses `Q(sqrt(2*snr))`; M-QAM uses the standard
/// `(4/k)(1 - 1/sqrt(M)) * Q(sqrt(3*snr/(M-1)))` form, which is also a
/// reasonable approximation for QPSK (Gray-coded, k=2).
pub fn ber(modulation: Modulation, snr_linear: f64) -> f64 {
    let snr = snr_linear.max(0.0);
    match modulation {
        Modulation::Bpsk => q_function((2.0 * snr).sqrt()),
        other => {
            let k = other.bits_per_symbol();
            let m = other.order();
            let prefactor = (4.0 / k) * (1.0 - 1.0 / m.sqrt());
            prefactor * q_function((3.0 * snr / (m - 1.0)).sqrt())
        }
    }
    .clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ber_decreases_with_snr() {
        let low = ber(Modulation::Qam64, 1.0);
        let high = ber(Modulation::Qam64, 100.0);
        assert!(high < low);
    }

    #[test]
    fn ber_is_bounded() {
        let b = ber(Modulation::Qam4096, 0.0);
        assert!((0.0..=1.0).contains(&b));
    }

    #[test]
    fn higher_order_modulation_is_less_robust_at_same_snr() {
        let bpsk = ber(Modulation::Bpsk, 10.0);
        let qam256 = ber(Modulation::Qam256, 10.0);
        assert!(qam256 > bpsk);
    }
}
