//! Backend that delegates ray tracing to an external solver process,
//! following the same shell-out-and-parse idiom as the traffic-control
//! drivers in this workspace: spawn, write a JSON request to stdin, read a
//! JSON response from stdout.

use crate::engine::{InteractionKind, PathRequest, RawPath, RayTraceBackend};
use crate::error::ChannelError;
use crate::scene::{BoundingBox, SceneObject, SceneSummary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// One (re, im) amplitude, delay, vertex sequence, and interaction codes for
/// a single ray-traced path.
#[derive(Debug, Deserialize)]
struct WorkerPath {
    re: f64,
    im: f64,
    delay_ns: f64,
    #[serde(default)]
    vertices: Vec<(f64, f64, f64)>,
    /// Missing or malformed entirely omitted by the worker -> unreadable.
    interactions: Option<Vec<String>>,
}

/// The solver reports paths as a synthetic single-antenna array: one
/// element along the rx-antenna axis and one along the tx-antenna axis,
/// wrapping the actual per-path list. This keeps the wire shape
/// four-dimensional (rx antenna, tx antenna, path, complex amplitude
/// component) regardless of how many physical antenna elements a real
/// radio would have. A shape that doesn't reduce to exactly one rx and one
/// tx antenna is rejected rather than guessed at.
#[derive(Debug, Deserialize)]
struct WorkerSolveResponse {
    paths: Vec<Vec<Vec<WorkerPath>>>,
}

#[derive(Debug, Deserialize)]
struct WorkerLoadSceneResponse {
    objects: Vec<WorkerSceneObject>,
}

#[derive(Debug, Deserialize)]
struct WorkerSceneObject {
    name: String,
    material: String,
    bbox_min: (f64, f64, f64),
    bbox_max: (f64, f64, f64),
}

#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum WorkerRequest<'a> {
    LoadScene { scene_file: &'a str, frequency_hz: u64 },
    Solve { frequency_hz: u64, tx: WireEndpoint, rx: WireEndpoint },
}

#[derive(Debug, Serialize)]
struct WireEndpoint {
    position: (f64, f64, f64),
    antenna_pattern: Option<String>,
    antenna_gain_dbi: Option<f64>,
}

/// Ray-traced backend that drives an external path-solver binary. The
/// binary is invoked once per request; there is no persistent worker
/// process to keep alive or restart on crash.
pub struct SubprocessBackend {
    worker_command: String,
}

impl SubprocessBackend {
    pub fn new(worker_command: impl Into<String>) -> Self {
        Self { worker_command: worker_command.into() }
    }

    async fn run(&self, request: &WorkerRequest<'_>) -> Result<Vec<u8>, ChannelError> {
        let payload = serde_json::to_vec(request)?;
        let mut child = Command::new(&self.worker_command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        child
            .stdin
            .take()
            .expect("piped stdin")
            .write_all(&payload)
            .await?;

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ChannelError::WorkerFailed(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl RayTraceBackend for SubprocessBackend {
    async fn load_scene(&mut self, scene_file: &str, frequency_hz: u64) -> Result<SceneSummary, ChannelError> {
        let request = WorkerRequest::LoadScene { scene_file, frequency_hz };
        let stdout = self.run(&request).await?;
        let response: WorkerLoadSceneResponse = serde_json::from_slice(&stdout)?;

        let objects = response
            .objects
            .into_iter()
            .map(|o| SceneObject {
                name: o.name,
                material: o.material,
                bounding_box: BoundingBox { min: o.bbox_min, max: o.bbox_max },
            })
            .collect();

        Ok(SceneSummary { file: scene_file.to_string(), objects })
    }

    async fn solve(&mut self, frequency_hz: u64, request: &PathRequest) -> Result<Vec<RawPath>, ChannelError> {
        let wire_request = WorkerRequest::Solve {
            frequency_hz,
            tx: to_wire_endpoint(request.tx_position, &request.tx_antenna),
            rx: to_wire_endpoint(request.rx_position, &request.rx_antenna),
        };
        let stdout = self.run(&wire_request).await?;
        let response: WorkerSolveResponse = serde_json::from_slice(&stdout)?;

        if response.paths.len() != 1 || response.paths[0].len() != 1 {
            return Err(ChannelError::UnsupportedArrayRank { rank: response.paths.len() });
        }

        Ok(response.paths[0][0]
            .iter()
            .map(|p| RawPath {
                amplitude_re: p.re,
                amplitude_im: p.im,
                delay_ns: p.delay_ns,
                vertices: p.vertices.clone(),
                interactions: p.interactions.as_ref().map(|codes| codes.iter().filter_map(|c| parse_interaction(c)).collect()),
            })
            .collect())
    }
}

fn to_wire_endpoint(position: wn_types::Position, antenna: &wn_types::AntennaProfile) -> WireEndpoint {
    WireEndpoint {
        position: (position.x, position.y, position.z),
        antenna_pattern: antenna.pattern.map(|p| format!("{p:?}").to_lowercase()),
        antenna_gain_dbi: antenna.gain_dbi,
    }
}

fn parse_interaction(code: &str) -> Option<InteractionKind> {
    match code {
        "specular" | "specular_reflection" => Some(InteractionKind::Specular),
        "diffuse" | "diffuse_reflection" => Some(InteractionKind::Diffuse),
        "refraction" => Some(InteractionKind::Refraction),
        "diffraction" => Some(InteractionKind::Diffraction),
        _ => None,
    }
}
