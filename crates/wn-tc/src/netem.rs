use wn_types::NetemParams;

/// netem qdisc parameters in the units `tc` expects (microseconds, whole
/// percent).
#[derive(Debug, Clone, Copy)]
pub struct NetemConfig {
    pub delay_us: u64,
    pub jitter_us: u64,
    pub loss_percent: f64,
}

impl From<NetemParams> for NetemConfig {
    fn from(params: NetemParams) -> Self {
        Self {
            delay_us: (params.delay_ms * 1000.0).round().max(0.0) as u64,
            jitter_us: (params.jitter_ms * 1000.0).round().max(0.0) as u64,
            loss_percent: params.loss_percent,
        }
    }
}

/// Token-bucket-filter parameters used as the child qdisc under netem,
/// since netem has no native rate limiter (spec §4.6).
#[derive(Debug, Clone, Copy)]
pub struct TbfConfig {
    pub rate_bps: u64,
    pub burst_bytes: u64,
    pub latency_ms: u64,
}

/// ~4 ms of line rate as the burst budget, ~50 ms latency tolerance.
const BURST_MS: f64 = 4.0;
const LATENCY_MS: u64 = 50;

impl TbfConfig {
    pub fn from_rate_mbps(rate_mbps: f64) -> Self {
        let rate_bps = (rate_mbps.max(0.001) * 1.0e6) as u64;
        let burst_bytes = ((rate_bps as f64 / 8.0) * (BURST_MS / 1000.0)).max(1500.0) as u64;
        Self { rate_bps, burst_bytes, latency_ms: LATENCY_MS }
    }
}

/// Per-destination HTB class parameters in the shared-bridge hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct HtbConfig {
    pub rate_bps: u64,
    pub ceil_bps: u64,
}

impl HtbConfig {
    pub fn from_rate_mbps(rate_mbps: f64) -> Self {
        let rate_bps = (rate_mbps.max(0.001) * 1.0e6) as u64;
        Self { rate_bps, ceil_bps: rate_bps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn netem_config_converts_ms_to_us() {
        let params = NetemParams::new(10.0, 2.0, 0.5, 50.0).unwrap();
        let config = NetemConfig::from(params);
        assert_eq!(config.delay_us, 10_000);
        assert_eq!(config.jitter_us, 2_000);
        assert_eq!(config.loss_percent, 0.5);
    }

    #[test]
    fn tbf_burst_scales_with_rate() {
        let slow = TbfConfig::from_rate_mbps(1.0);
        let fast = TbfConfig::from_rate_mbps(100.0);
        assert!(fast.burst_bytes > slow.burst_bytes);
    }
}
