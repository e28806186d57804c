//! Sweep data model: axes, job specs, resource requests and the training
//! program.

mod axis;
mod job;
mod program;
mod resources;

pub use axis::*;
pub use job::*;
pub use program::*;
pub use resources::*;
