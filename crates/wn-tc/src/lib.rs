//! Traffic-control driver: applies derived netem parameters to interfaces
//! inside a target network namespace, in either point-to-point or
//! shared-bridge topology.

pub mod bridge;
pub mod error;
pub mod manager;
pub mod netem;
pub mod p2p;

pub use bridge::{apply_shared_bridge, assign_class_ids, BridgeDestination};
pub use error::TcError;
pub use manager::TcManager;
pub use netem::{HtbConfig, NetemConfig, TbfConfig};
pub use p2p::apply_point_to_point;
