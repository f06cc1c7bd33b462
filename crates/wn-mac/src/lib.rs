//! Statistical MAC models: CSMA/CA carrier-sense deferral and TDMA slot
//! overlap, both reduced to a `tx_probability` consumed by the interference
//! engine.

pub mod csma;
pub mod model;
pub mod tdma;

pub use csma::{sense_threshold_dbm, CsmaModel};
pub use model::{MacContext, MacModel, MacModelError};
pub use tdma::TdmaModel;
