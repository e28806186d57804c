//! Subcommand implementations
//!
//! Each command writes its user-facing output to the given writer so the
//! binary can pass stdout and tests can pass a buffer.

mod axes;
mod edit;
mod plan;
mod render;
mod submit;

pub use axes::show_axes;
pub use edit::{init, set_enabled};
pub use plan::{PlanFormat, show_plan};
pub use submit::{SubmitOptions, submit};
