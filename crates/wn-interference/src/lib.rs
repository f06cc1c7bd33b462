//! ACLR-weighted interference aggregation and SINR derivation.

pub mod aclr;
pub mod engine;

pub use aclr::{aclr_db, is_orthogonal};
pub use engine::{compute_sinr, InterfererInput};
