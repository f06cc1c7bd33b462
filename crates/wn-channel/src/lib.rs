//! Directional channel computation: ray-traced paths when a scene is loaded
//! for the link's frequency, free-space propagation otherwise.

pub mod engine;
pub mod error;
pub mod free_space;
pub mod geometry;
pub mod scene;
pub mod subprocess;

pub use engine::{ChannelEngine, InteractionKind, PathRequest, RawPath, RayTraceBackend};
pub use error::ChannelError;
pub use scene::{BoundingBox, SceneObject, SceneRegistry, SceneSummary};
pub use subprocess::SubprocessBackend;
