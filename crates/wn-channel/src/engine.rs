use crate::error::ChannelError;
use crate::scene::{SceneRegistry, SceneSummary};
use crate::{free_space, geometry};
use async_trait::async_trait;
use std::collections::HashMap;
use wn_types::{AntennaProfile, ChannelResult, Position};

/// Directional geometry for one channel computation: transmitter and
/// receiver positions and antenna profiles. Does not carry power or
/// bandwidth — those belong to the link-budget layer above this engine.
#[derive(Debug, Clone)]
pub struct PathRequest {
    pub tx_position: Position,
    pub tx_antenna: AntennaProfile,
    pub rx_position: Position,
    pub rx_antenna: AntennaProfile,
}

/// One raw path reported by the solver: complex amplitude (re, im), delay
/// in nanoseconds, vertex sequence, and interaction-type codes along the
/// path (specular, diffuse, refraction, diffraction).
#[derive(Debug, Clone)]
pub struct RawPath {
    pub amplitude_re: f64,
    pub amplitude_im: f64,
    pub delay_ns: f64,
    pub vertices: Vec<(f64, f64, f64)>,
    /// `Some(codes)` where an empty vec means a direct (all-zero) path;
    /// `None` if the solver's interaction codes for this path could not be
    /// decoded, triggering the delay-based LOS fallback.
    pub interactions: Option<Vec<InteractionKind>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Specular,
    Diffuse,
    Refraction,
    Diffraction,
}

/// A ray-tracing backend: loads scene geometry and solves for paths between
/// a synthetic single-antenna transmitter/receiver pair. Implementations
/// own the lifecycle of whatever external solver they wrap; the engine only
/// asks for scene load and per-request solves.
#[async_trait]
pub trait RayTraceBackend: Send + Sync {
    /// Load (or replace) the scene used for `frequency_hz`.
    async fn load_scene(&mut self, scene_file: &str, frequency_hz: u64) -> Result<SceneSummary, ChannelError>;

    /// Add a transmitter/receiver pair at the requested geometry, solve for
    /// paths, then remove the pair before returning. Scene geometry itself
    /// persists across calls.
    async fn solve(&mut self, frequency_hz: u64, request: &PathRequest) -> Result<Vec<RawPath>, ChannelError>;
}

/// Dispatches each directional channel computation to the ray-traced
/// backend when a scene is loaded for that frequency, or to the free-space
/// fallback otherwise. Holds at most one scene per distinct carrier
/// frequency, per spec.
pub struct ChannelEngine<B: RayTraceBackend> {
    backend: B,
    scenes: SceneRegistry,
}

impl<B: RayTraceBackend> ChannelEngine<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, scenes: SceneRegistry::new() }
    }

    pub async fn load_scene(&mut self, scene_file: &str, frequency_hz: u64) -> Result<(), ChannelError> {
        let summary = self.backend.load_scene(scene_file, frequency_hz).await?;
        self.scenes.install(frequency_hz, summary);
        Ok(())
    }

    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    /// Compute the directional channel for `request` at `frequency_hz`. Uses
    /// the ray-traced backend if a scene is loaded for that frequency,
    /// otherwise falls back to free-space propagation.
    pub async fn compute(&mut self, frequency_hz: u64, request: &PathRequest) -> Result<ChannelResult, ChannelError> {
        let distance_m = request.tx_position.distance_to(&request.rx_position);

        if !self.scenes.is_loaded(frequency_hz) {
            return Ok(free_space::compute(request.tx_position, request.rx_position, frequency_hz as f64));
        }

        let paths = self.backend.solve(frequency_hz, request).await?;
        if paths.is_empty() {
            tracing::warn!(frequency_hz, "ray-tracer returned no paths, reporting degenerate result");
            return Ok(ChannelResult::degenerate(distance_m));
        }

        Ok(geometry::summarize(&paths, distance_m))
    }
}

/// In-memory map of scene summaries for the visualization API, independent
/// of which backend produced them.
pub type SceneSummaries = HashMap<u64, SceneSummary>;
