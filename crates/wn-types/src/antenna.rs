use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

/// Named antenna radiation pattern. Gain for these is implicit in the
/// ray tracer's path coefficients — see `AntennaProfile` doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntennaPattern {
    Iso,
    Dipole,
    HwDipole,
    Tr38901,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarization {
    V,
    H,
    Vh,
    Cross,
}

/// Exactly one of `pattern` or `gain_dbi` must be set: a named pattern whose
/// gain is folded into the ray tracer's path coefficients, or an explicit
/// scalar gain applied in the free-space link budget. Mixing the two would
/// double-count gain in ray-traced mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntennaProfile {
    pub pattern: Option<AntennaPattern>,
    pub gain_dbi: Option<f64>,
    pub polarization: Polarization,
}

impl AntennaProfile {
    pub fn named(pattern: AntennaPattern, polarization: Polarization) -> Self {
        Self { pattern: Some(pattern), gain_dbi: None, polarization }
    }

    pub fn explicit_gain(gain_dbi: f64, polarization: Polarization) -> Self {
        Self { pattern: None, gain_dbi: Some(gain_dbi), polarization }
    }

    /// Enforces the mutual-exclusion invariant from the data model.
    pub fn validate(&self, context: &str) -> Result<(), TopologyError> {
        match (&self.pattern, &self.gain_dbi) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) => Err(TopologyError::AntennaMutualExclusion {
                context: context.to_string(),
                reason: "both pattern and gain_dbi set".to_string(),
            }),
            (None, None) => Err(TopologyError::AntennaMutualExclusion {
                context: context.to_string(),
                reason: "neither pattern nor gain_dbi set".to_string(),
            }),
        }
    }

    /// Explicit gain to use in free-space mode; named patterns contribute 0
    /// dBi here because their gain is already folded into the ray-traced
    /// channel loss (and free-space mode with a named pattern degrades to an
    /// isotropic assumption).
    pub fn free_space_gain_dbi(&self) -> f64 {
        self.gain_dbi.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_both_set() {
        let profile = AntennaProfile {
            pattern: Some(AntennaPattern::Iso),
            gain_dbi: Some(3.0),
            polarization: Polarization::V,
        };
        assert!(profile.validate("tx").is_err());
    }

    #[test]
    fn rejects_neither_set() {
        let profile = AntennaProfile { pattern: None, gain_dbi: None, polarization: Polarization::V };
        assert!(profile.validate("tx").is_err());
    }

    #[test]
    fn accepts_exactly_one() {
        assert!(AntennaProfile::named(AntennaPattern::Dipole, Polarization::Vh).validate("tx").is_ok());
        assert!(AntennaProfile::explicit_gain(5.0, Polarization::H).validate("rx").is_ok());
    }
}
