//! Testing infrastructure for the fnwrap workspace.
//!
//! - `Capture`: a sink that records diagnostic lines for assertion
//! - `Probe` and the `probed` constructors: targets whose raw body
//!   executions are observable independently of any wrapper accounting

pub mod probe;
pub mod sink;

pub use probe::{Probe, probed, probed_recursive};
pub use sink::Capture;
