use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A loaded scene's metadata, enough to answer the channel service's
/// visualization-state query without re-reading the scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSummary {
    pub file: String,
    pub objects: Vec<SceneObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    /// ITU-style material name, e.g. `itu_concrete`.
    pub material: String,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: (f64, f64, f64),
    pub max: (f64, f64, f64),
}

/// One scene loaded per distinct carrier frequency. `SceneRegistry` tracks
/// which frequencies currently have a scene installed; replacing a
/// frequency's entry is how "loading a new scene for a frequency replaces
/// the previous one" is implemented.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    by_frequency: HashMap<u64, SceneSummary>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, frequency_hz: u64, summary: SceneSummary) {
        self.by_frequency.insert(frequency_hz, summary);
    }

    pub fn is_loaded(&self, frequency_hz: u64) -> bool {
        self.by_frequency.contains_key(&frequency_hz)
    }

    pub fn get(&self, frequency_hz: u64) -> Option<&SceneSummary> {
        self.by_frequency.get(&frequency_hz)
    }

    pub fn all(&self) -> impl Iterator<Item = (&u64, &SceneSummary)> {
        self.by_frequency.iter()
    }
}
