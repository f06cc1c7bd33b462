//! Step 1 of the controller lifecycle ("Load & validate"). `wn_types::Topology`
//! already runs every static check named in spec §4.8 step 1 / §7 at parse
//! time (`Topology::validate`); this module just re-runs it defensively at
//! deploy time in case the caller constructed or mutated a `Topology` value
//! without going through `load_and_validate`.

use wn_types::{Topology, TopologyError};

pub fn validate(topology: &Topology) -> Result<(), TopologyError> {
    topology.validate()
}
