/// Maps channel-level delay spread and MCS robustness onto a netem jitter
/// value. There is no standard closed-form for this, so the mapping is
/// expressed as a trait: callers who need a different heuristic can supply
/// their own implementation instead of patching this one.
pub trait JitterPolicy: Send + Sync {
    /// `tau_rms_ns` is the RMS delay spread from the channel engine,
    /// `mcs_robustness_factor` is in `[0, 1]` with `1.0` meaning the most
    /// robust (lowest-order) MCS, and `delay_ms` is the mean delay the
    /// result is clamped against — jitter should never exceed the delay
    /// it varies around.
    fn jitter_ms(&self, tau_rms_ns: f64, mcs_robustness_factor: f64, delay_ms: f64) -> f64;
}

/// `sqrt(tau_rms_ns) * mcs_robustness_factor`, clamped to `[0, delay_ms]`.
/// Larger delay spread widens the jitter envelope; a more robust MCS
/// (higher `mcs_robustness_factor`) tends to ride out timing variation
/// better, so it pulls jitter down.
pub struct DefaultJitterPolicy;

impl JitterPolicy for DefaultJitterPolicy {
    fn jitter_ms(&self, tau_rms_ns: f64, mcs_robustness_factor: f64, delay_ms: f64) -> f64 {
        let tau_rms_ns = tau_rms_ns.max(0.0);
        let robustness = mcs_robustness_factor.clamp(0.0, 1.0);
        let jitter_ns = tau_rms_ns.sqrt() * robustness;
        (jitter_ns / 1.0e6).clamp(0.0, delay_ms.max(0.0))
    }
}

pub fn default_jitter_policy() -> DefaultJitterPolicy {
    DefaultJitterPolicy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_is_zero_with_no_delay_spread() {
        let j = default_jitter_policy().jitter_ms(0.0, 1.0, 10.0);
        assert_eq!(j, 0.0);
    }

    #[test]
    fn jitter_never_exceeds_mean_delay() {
        let j = default_jitter_policy().jitter_ms(1.0e12, 1.0, 5.0);
        assert!(j <= 5.0);
    }

    #[test]
    fn more_robust_mcs_yields_less_jitter() {
        let robust = default_jitter_policy().jitter_ms(1.0e6, 0.2, 100.0);
        let fragile = default_jitter_policy().jitter_ms(1.0e6, 1.0, 100.0);
        assert!(robust < fragile);
    }
}
