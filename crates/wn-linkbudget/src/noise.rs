/// Thermal noise floor in dBm: `N = -174 + 10*log10(BW_Hz) + NF_dB`.
///
/// `-174 dBm/Hz` is the standard thermal noise density at room temperature
/// (`kT` at ~290 K). `bandwidth_hz` must be positive; callers are expected to
/// validate this upstream (interface bandwidth is a required, range-checked
/// topology field).
pub fn noise_floor_dbm(bandwidth_hz: f64, noise_figure_db: f64) -> f64 {
    let bw = bandwidth_hz.max(1.0);
    -174.0 + 10.0 * bw.log10() + noise_figure_db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_80mhz_7db_example() {
        // spec scenario 1: 80 MHz, NF 7 dB -> N ~ -88 dBm
        let n = noise_floor_dbm(80.0e6, 7.0);
        assert!((n - (-88.0)).abs() < 1.0, "got {n}");
    }

    #[test]
    fn wider_bandwidth_raises_the_floor() {
        let narrow = noise_floor_dbm(20.0e6, 5.0);
        let wide = noise_floor_dbm(80.0e6, 5.0);
        assert!(wide > narrow);
    }
}
