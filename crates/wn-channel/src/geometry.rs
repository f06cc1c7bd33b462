use crate::engine::{InteractionKind, RawPath};
use wn_types::{ChannelResult, DominantPath, PathGeometry};

const GAIN_EPSILON: f64 = 1.0e-30;

/// Reduces a solved path set into the channel-computation result defined in
/// the data model: total gain -> channel loss, power-delay-profile second
/// moment -> RMS delay spread, strongest path's interaction codes ->
/// dominant-path classification.
pub fn summarize(paths: &[RawPath], distance_m: f64) -> ChannelResult {
    let powers: Vec<f64> = paths.iter().map(path_power).collect();
    let total_gain: f64 = powers.iter().sum();
    let path_loss_db = -10.0 * (total_gain + GAIN_EPSILON).log10();

    let delay_spread_ns = rms_delay_spread_ns(paths, &powers);

    let strongest_idx = powers
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0);
    let strongest = &paths[strongest_idx];
    let strongest_path_power_db = 10.0 * (powers[strongest_idx] + GAIN_EPSILON).log10();
    let dominant_path = classify_dominant_path(strongest);

    let path_geometries = paths
        .iter()
        .zip(&powers)
        .map(|(path, &power)| PathGeometry {
            vertices: path.vertices.clone(),
            interaction_sequence: path
                .interactions
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(|i| interaction_name(*i).to_string())
                .collect(),
            power_db: 10.0 * (power + GAIN_EPSILON).log10(),
            delay_ns: path.delay_ns,
        })
        .collect();

    ChannelResult {
        path_loss_db,
        delay_spread_ns,
        dominant_path,
        distance_m,
        strongest_path_power_db,
        strongest_path_delay_ns: strongest.delay_ns,
        num_paths: paths.len() as u32,
        paths: path_geometries,
    }
}

fn path_power(path: &RawPath) -> f64 {
    path.amplitude_re * path.amplitude_re + path.amplitude_im * path.amplitude_im
}

/// RMS delay spread is the second central moment of the power-delay profile
/// normalized by total power; zero for a single path (spec §4.2).
fn rms_delay_spread_ns(paths: &[RawPath], powers: &[f64]) -> f64 {
    if paths.len() <= 1 {
        return 0.0;
    }
    let total: f64 = powers.iter().sum::<f64>().max(GAIN_EPSILON);
    let mean_delay: f64 = paths.iter().zip(powers).map(|(p, &pw)| pw * p.delay_ns).sum::<f64>() / total;
    let variance: f64 = paths
        .iter()
        .zip(powers)
        .map(|(p, &pw)| pw * (p.delay_ns - mean_delay).powi(2))
        .sum::<f64>()
        / total;
    variance.max(0.0).sqrt()
}

fn classify_dominant_path(strongest: &RawPath) -> DominantPath {
    match &strongest.interactions {
        Some(codes) if codes.is_empty() => DominantPath::Los,
        Some(codes) if codes.contains(&InteractionKind::Diffraction) => DominantPath::Diffraction,
        Some(_) => DominantPath::Nlos,
        None => {
            if strongest.delay_ns < 10.0 {
                DominantPath::Los
            } else {
                DominantPath::Nlos
            }
        }
    }
}

fn interaction_name(kind: InteractionKind) -> &'static str {
    match kind {
        InteractionKind::Specular => "specular_reflection",
        InteractionKind::Diffuse => "diffuse_reflection",
        InteractionKind::Refraction => "refraction",
        InteractionKind::Diffraction => "diffraction",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(re: f64, im: f64, delay_ns: f64, interactions: Option<Vec<InteractionKind>>) -> RawPath {
        RawPath { amplitude_re: re, amplitude_im: im, delay_ns, vertices: Vec::new(), interactions }
    }

    #[test]
    fn single_path_has_zero_delay_spread() {
        let paths = vec![path(0.5, 0.0, 5.0, Some(vec![]))];
        let result = summarize(&paths, 10.0);
        assert_eq!(result.delay_spread_ns, 0.0);
        assert_eq!(result.dominant_path, DominantPath::Los);
    }

    #[test]
    fn diffraction_on_strongest_path_dominates() {
        let paths = vec![
            path(0.9, 0.0, 5.0, Some(vec![InteractionKind::Diffraction])),
            path(0.1, 0.0, 20.0, Some(vec![InteractionKind::Specular])),
        ];
        let result = summarize(&paths, 10.0);
        assert_eq!(result.dominant_path, DominantPath::Diffraction);
    }

    #[test]
    fn unreadable_interactions_fall_back_to_delay_threshold() {
        let paths = vec![path(0.5, 0.0, 3.0, None), path(0.1, 0.0, 40.0, Some(vec![InteractionKind::Specular]))];
        let result = summarize(&paths, 10.0);
        assert_eq!(result.dominant_path, DominantPath::Los);
    }

    #[test]
    fn multi_path_delay_spread_is_positive() {
        let paths = vec![
            path(0.8, 0.0, 0.0, Some(vec![])),
            path(0.3, 0.0, 50.0, Some(vec![InteractionKind::Specular])),
        ];
        let result = summarize(&paths, 10.0);
        assert!(result.delay_spread_ns > 0.0);
    }
}
