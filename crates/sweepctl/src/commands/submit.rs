use std::io::Write;

use color_eyre::eyre::eyre;
use sweepctl_core::{
    DispatchError, DispatchReport, DryRunSubmitter, FailurePolicy, ProcessSubmitter, SweepConfig,
    dispatch,
};

use super::render::ReportSummary;

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Print the commands instead of running them
    pub dry_run: bool,
    /// Stop at the first failed submission and exit non-zero
    pub fail_fast: bool,
}

/// Submit the whole sweep and print a per-job summary.
///
/// Under the continue policy failed submissions are reported but the command
/// still succeeds. Under the abort policy the first failure is an error.
pub fn submit(
    config: &SweepConfig,
    options: SubmitOptions,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let mut config = config.clone();
    if options.fail_fast {
        config.failure_policy = FailurePolicy::Abort;
    }

    if options.dry_run {
        let mut submitter = DryRunSubmitter::default();
        let result = dispatch(&config, &mut submitter);
        for command in submitter.submitted() {
            writeln!(out, "{command}")?;
        }
        return finish(result, out);
    }

    let mut submitter = ProcessSubmitter::echoing();
    finish(dispatch(&config, &mut submitter), out)
}

fn finish(
    result: Result<DispatchReport, DispatchError>,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    match result {
        Ok(report) => {
            write!(out, "{}", ReportSummary(&report))?;
            Ok(())
        }
        Err(DispatchError::Aborted {
            report,
            job,
            source,
        }) => {
            write!(out, "{}", ReportSummary(&report))?;
            Err(eyre!("sweep aborted at `{job}`: {source}"))
        }
        Err(err) => Err(err.into()),
    }
}
