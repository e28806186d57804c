use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{ResourceRequest, SweepAxes, TrainingProgram};
use crate::scheduler::SchedulerKind;

/// What the dispatcher does after a submission fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and keep submitting the remaining jobs
    #[default]
    Continue,
    /// Stop at the first failed submission
    Abort,
}

/// A complete sweep: where jobs go, what they run, and over which values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub scheduler: SchedulerKind,
    pub resources: ResourceRequest,
    pub program: TrainingProgram,
    pub axes: SweepAxes,
    pub failure_policy: FailurePolicy,
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resources.validate()?;
        self.program.validate()?;
        self.axes.validate()?;
        Ok(())
    }

    /// Number of jobs the sweep produces
    pub fn total_jobs(&self) -> usize {
        self.axes.total_jobs()
    }
}
