//! Sweep dispatch
//!
//! [`plan`] expands a validated [`SweepConfig`] into one rendered submission
//! command per job. [`dispatch`] hands those commands to a [`Submitter`] one
//! at a time, in sweep order, and records what happened to each.
//!
//! The dispatcher never waits on jobs, never retries, and never collects job
//! results. A failed submission is recorded and, under
//! [`FailurePolicy::Continue`], the remaining jobs are still submitted.

mod report;
mod submitter;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{FailurePolicy, SweepConfig};
use crate::error::{ConfigError, DispatchError};
use crate::model::JobSpec;
use crate::scheduler::SubmitCommand;

pub use report::{DispatchReport, JobOutcome, OutcomeStatus};
pub use submitter::{DryRunSubmitter, ProcessSubmitter, SubmitOutput, Submitter};

/// One job and the command that submits it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedJob {
    pub job: JobSpec,
    pub job_name: String,
    pub command: SubmitCommand,
}

/// Expand the sweep into submission commands, in sweep order
pub fn plan(config: &SweepConfig) -> Result<Vec<PlannedJob>, ConfigError> {
    config.validate()?;
    let backend = config.scheduler.backend();

    Ok(config
        .axes
        .jobs()
        .map(|job| {
            let job_name = job.output_name();
            let command = backend.render(
                &config.resources,
                &job_name,
                &job.program_args(&config.program),
            );
            PlannedJob {
                job,
                job_name,
                command,
            }
        })
        .collect())
}

/// Submit every job of the sweep, sequentially
pub fn dispatch<S: Submitter + ?Sized>(
    config: &SweepConfig,
    submitter: &mut S,
) -> Result<DispatchReport, DispatchError> {
    let planned = plan(config)?;
    let backend = config.scheduler.backend();
    let mut report = DispatchReport::new(planned.len());

    info!(
        scheduler = %config.scheduler,
        jobs = planned.len(),
        policy = ?config.failure_policy,
        "Dispatching sweep"
    );

    for PlannedJob {
        job,
        job_name,
        command,
    } in planned
    {
        debug!(index = job.index, %command, "Submitting job");

        match submitter.submit(&command) {
            Ok(output) => {
                let job_id = backend.parse_job_id(&output.stdout);
                info!(
                    index = job.index,
                    job = %job_name,
                    job_id = job_id.as_deref().unwrap_or("-"),
                    "Job submitted"
                );
                report.record(JobOutcome {
                    index: job.index,
                    job_name,
                    status: OutcomeStatus::Submitted { job_id },
                });
            }
            Err(err) => {
                warn!(index = job.index, job = %job_name, "Submission failed: {err}");
                report.record(JobOutcome {
                    index: job.index,
                    job_name: job_name.clone(),
                    status: OutcomeStatus::Failed {
                        error: err.to_string(),
                    },
                });
                if config.failure_policy == FailurePolicy::Abort {
                    warn!(
                        skipped = report.skipped_count(),
                        "Aborting sweep after failed submission"
                    );
                    return Err(DispatchError::Aborted {
                        report: Box::new(report),
                        job: job_name,
                        source: err,
                    });
                }
            }
        }
    }

    info!(
        submitted = report.submitted_count(),
        failed = report.failed_count(),
        "Sweep dispatched"
    );
    Ok(report)
}
