use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("scene file not found: {0}")]
    SceneFileNotFound(String),

    #[error("unknown material referenced by scene: {0}")]
    UnknownMaterial(String),

    #[error("no scene loaded for frequency {frequency_hz} Hz")]
    NoSceneForFrequency { frequency_hz: u64 },

    #[error("ray-tracer worker reported a non-4D path array (rank {rank}); synthetic single-antenna arrays are assumed 4D")]
    UnsupportedArrayRank { rank: usize },

    #[error("ray-tracer worker process failed: {0}")]
    WorkerFailed(String),

    #[error("failed to decode ray-tracer worker output: {0}")]
    WorkerDecode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
