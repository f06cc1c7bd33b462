use wn_linkbudget::free_space_path_loss_db;
use wn_types::{ChannelResult, DominantPath, Position};

/// Speed of light, m/s.
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Free-space fallback used when no scene is loaded for the link's
/// frequency: channel loss is FSPL, delay is `d/c`, delay spread is zero,
/// and the dominant path is always line-of-sight.
pub fn compute(tx_position: Position, rx_position: Position, frequency_hz: f64) -> ChannelResult {
    let distance_m = tx_position.distance_to(&rx_position);
    let path_loss_db = free_space_path_loss_db(distance_m, frequency_hz);
    let delay_ns = (distance_m / SPEED_OF_LIGHT_M_S) * 1.0e9;

    ChannelResult {
        path_loss_db,
        delay_spread_ns: 0.0,
        dominant_path: DominantPath::Los,
        distance_m,
        strongest_path_power_db: -path_loss_db,
        strongest_path_delay_ns: delay_ns,
        num_paths: 1,
        paths: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_fspl_for_known_distance() {
        let tx = Position::new(0.0, 0.0, 0.0);
        let rx = Position::new(20.0, 0.0, 0.0);
        let result = compute(tx, rx, 5.18e9);
        assert!((result.path_loss_db - 72.76).abs() < 0.1);
        assert_eq!(result.delay_spread_ns, 0.0);
        assert_eq!(result.dominant_path, DominantPath::Los);
    }

    #[test]
    fn delay_scales_with_distance() {
        let tx = Position::new(0.0, 0.0, 0.0);
        let near = compute(tx, Position::new(10.0, 0.0, 0.0), 2.4e9);
        let far = compute(tx, Position::new(1000.0, 0.0, 0.0), 2.4e9);
        assert!(far.strongest_path_delay_ns > near.strongest_path_delay_ns);
    }
}
