/// Block error rate from bit error rate over an `l`-bit block:
/// `1 - (1 - BER)^l`.
pub fn bler(ber: f64, block_bits: u64) -> f64 {
    per_from_ber(ber, block_bits)
}

/// Packet error rate from bit error rate over a packet of `packet_bits`
/// bits, clamped to `[0, 1]`. Below `BER = 1e-12` the exact power form loses
/// precision to floating point cancellation, so the first-order
/// approximation `packet_bits * BER` is used instead (matches spec §4.1).
pub fn per(ber: f64, packet_bits: u64) -> f64 {
    per_from_ber(ber, packet_bits)
}

fn per_from_ber(ber: f64, bits: u64) -> f64 {
    let ber = ber.clamp(0.0, 1.0);
    if ber < 1e-12 {
        return (bits as f64 * ber).clamp(0.0, 1.0);
    }
    (1.0 - (1.0 - ber).powi(bits.min(i32::MAX as u64) as i32)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_is_monotonic_in_ber() {
        let low = per(1e-6, 12_000);
        let high = per(1e-3, 12_000);
        assert!(high > low);
    }

    #[test]
    fn per_is_bounded() {
        assert!((per(1.0, 12_000) - 1.0).abs() < 1e-9);
        assert_eq!(per(0.0, 12_000), 0.0);
    }

    #[test]
    fn tiny_ber_uses_linear_approximation() {
        let ber = 1e-13;
        let bits = 1500u64 * 8;
        let approx = per(ber, bits);
        assert!((approx - (bits as f64 * ber)).abs() < 1e-15);
    }
}
