//! Hyperparameter sweep dispatch library
//!
//! This crate turns a set of hyperparameter axes into cluster job submissions.
//! It supports:
//! - Axes with enabled and disabled candidate values
//! - Row-major Cartesian product enumeration (last axis varies fastest)
//! - Training program argv construction (`--layer`, `--config`, `--out`, ...)
//! - LSF (`bsub`) and Slurm (`sbatch`) command rendering
//! - Sequential submission with an explicit failure policy and outcome report
//!
//! # Builder DSL
//!
//! ```ignore
//! use sweepctl_core::config::SweepBuilder;
//! use sweepctl_core::dispatch::{DryRunSubmitter, dispatch};
//!
//! let config = SweepBuilder::new()
//!     .units([128])
//!     .activations(["sigmoid", "tanh"])
//!     .layers(["GraphConv"])
//!     .optimizers(["Adam"])
//!     .metrics(["energy"])
//!     .repeats(0..2)
//!     .build();
//!
//! let mut submitter = DryRunSubmitter::default();
//! let report = dispatch(&config, &mut submitter)?;
//! assert_eq!(report.submitted_count(), 4);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod dispatch;
pub mod error;
pub mod grid;
pub mod scheduler;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{FailurePolicy, SweepBuilder, SweepConfig};
pub use dispatch::{
    DispatchReport, DryRunSubmitter, JobOutcome, OutcomeStatus, PlannedJob, ProcessSubmitter,
    Submitter, dispatch, plan,
};
pub use error::{ConfigError, DispatchError, SubmitError};
pub use model::{Axis, AxisName, Candidate, GpuRequest, JobSpec, ResourceRequest, SweepAxes};
pub use model::{TrainingProgram, output_name};
pub use scheduler::{Lsf, Scheduler, SchedulerKind, Slurm, SubmitCommand};
