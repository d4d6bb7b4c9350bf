//! Pure policy evaluation and impact simulation (no IO).
//!
//! Input: validated policies and request records constructed elsewhere.
//! Output: per-request decisions, and an impact report grouping decision changes by user.

#![forbid(unsafe_code)]

pub mod model;
pub mod partition;
pub mod policy;
pub mod simulate;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{evaluate, Evaluation};
pub use model::{Request, RequestRecord};
pub use partition::{partition, PartitionedReport, UserChanges};
pub use policy::{MalformedPolicy, Policy, Rule};
pub use simulate::{
    diff_request, simulate, ImpactRecord, ImpactReport, SimulationStats, Transition, UserImpacts,
};

#[cfg(feature = "parallel")]
pub use simulate::simulate_par;
