//! Sweep configuration and its builder DSL.

mod builder;
mod sweep;

pub use builder::SweepBuilder;
pub use sweep::{FailurePolicy, SweepConfig};
