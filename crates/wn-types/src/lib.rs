//! Declarative data model for the wireless-netem emulator.
//!
//! Mirrors the topology descriptor in the emulator's design document: nodes
//! hold wireless interfaces, interfaces hold positions and antenna profiles,
//! and links are either explicit point-to-point pairs or all derived from a
//! shared broadcast domain.

pub mod antenna;
pub mod builder;
pub mod error;
pub mod link;
pub mod mac;
pub mod mcs;
pub mod position;
pub mod results;
pub mod topology;

pub use antenna::{AntennaProfile, Polarization};
pub use error::TopologyError;
pub use link::{make_link_id, EndpointRequest, InterfererRequest, Link, LinkId, LinkRequest, SinrRequest};
pub use mac::{CsmaParams, MacConfig, SlotAssignment, SlotAssignmentMode, TdmaParams};
pub use mcs::{FecType, McsEntry, McsSelection, McsTable, Modulation, ModulationConfig};
pub use position::Position;
pub use results::{
    ChannelResult, DominantPath, InterferenceContribution, LinkOutcome, NetemParams, PathGeometry,
    SinrResult,
};
pub use topology::{Node, SharedBridge, Topology, WirelessInterface};
