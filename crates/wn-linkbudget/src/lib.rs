//! Closed-form link-budget math: noise floor, received power, BER/BLER/PER,
//! effective rate, and MCS selection with upgrade/downgrade hysteresis.
//!
//! These formulas approximate a physical radio channel for network-layer
//! emulation; they are not a PHY simulator. BER approximations do not model
//! burst errors — acceptable for shaping kernel qdiscs, not for PHY studies.

pub mod ber;
pub mod coding;
pub mod error_rate;
pub mod jitter;
pub mod mcs_select;
pub mod noise;
pub mod outcome;
pub mod rate;
pub mod received_power;

pub use ber::q_function;
pub use coding::coding_gain_db;
pub use error_rate::{bler, per};
pub use jitter::{default_jitter_policy, JitterPolicy};
pub use mcs_select::McsSelector;
pub use noise::noise_floor_dbm;
pub use outcome::{derive_netem, select_mcs_entry, LinkOutcomeError};
pub use rate::effective_rate_mbps;
pub use received_power::{free_space_path_loss_db, rx_power_free_space_dbm, rx_power_ray_traced_dbm};
