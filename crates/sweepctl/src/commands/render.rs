//! Plain-text listings of axes, plans and reports

use std::fmt;

use sweepctl_core::dispatch::{DispatchReport, OutcomeStatus, PlannedJob};
use sweepctl_core::model::{AxisSummary, SweepAxes};

/// One line per axis, then the grid shape. Disabled candidates are shown in
/// parentheses.
pub struct AxesListing<'a>(pub &'a SweepAxes);

/// Job name and submission command of every planned job
pub struct PlanListing<'a>(pub &'a [PlannedJob]);

/// Per-job outcome lines and a closing tally
pub struct ReportSummary<'a>(pub &'a DispatchReport);

fn write_axis(f: &mut fmt::Formatter<'_>, summary: &AxisSummary) -> fmt::Result {
    write!(
        f,
        "{:<11} {:>2} enabled ",
        summary.name.as_str(),
        summary.enabled_count()
    )?;
    for (value, enabled) in &summary.candidates {
        if *enabled {
            write!(f, " {value}")?;
        } else {
            write!(f, " ({value})")?;
        }
    }
    writeln!(f)
}

impl fmt::Display for AxesListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in self.0.summaries() {
            write_axis(f, &summary)?;
        }
        let shape: Vec<String> = self.0.shape().iter().map(usize::to_string).collect();
        writeln!(
            f,
            "\nshape {} = {} job(s)",
            shape.join(" x "),
            self.0.total_jobs()
        )
    }
}

impl fmt::Display for PlanListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for planned in self.0 {
            writeln!(f, "[{}] {}", planned.job.index, planned.job_name)?;
            writeln!(f, "    {}", planned.command)?;
        }
        writeln!(f, "{} job(s)", self.0.len())
    }
}

impl fmt::Display for ReportSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        for outcome in &report.outcomes {
            match &outcome.status {
                OutcomeStatus::Submitted { job_id } => {
                    let id = job_id.as_deref().unwrap_or("-");
                    writeln!(f, "submitted  {:<8} {}", id, outcome.job_name)?;
                }
                OutcomeStatus::Failed { error } => {
                    writeln!(f, "FAILED     {:<8} {}: {}", "-", outcome.job_name, error)?;
                }
            }
        }
        write!(
            f,
            "{} of {} submitted, {} failed",
            report.submitted_count(),
            report.planned,
            report.failed_count()
        )?;
        if report.skipped_count() > 0 {
            write!(f, ", {} skipped", report.skipped_count())?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use sweepctl_core::dispatch::JobOutcome;

    use super::*;

    #[test]
    fn test_render_axes_marks_disabled_values() {
        let text = AxesListing(&SweepAxes::default()).to_string();
        let units = text.lines().next().unwrap();
        assert!(units.starts_with("units"));
        assert!(units.contains(" 1 enabled  128 (32) (64) (256) (512)"));
        assert!(text.contains("shape 1 x 1 x 1 x 1 x 1 x 1 = 1 job(s)"));
    }

    #[test]
    fn test_plan_listing_counts_jobs() {
        let text = PlanListing(&[]).to_string();
        assert_eq!(text, "0 job(s)\n");
    }

    #[test]
    fn test_render_report_summary() {
        let mut report = DispatchReport::new(3);
        report.record(JobOutcome {
            index: 0,
            job_name: "GraphConv_Adam_energy_0_basis_free".to_string(),
            status: OutcomeStatus::Submitted {
                job_id: Some("812".to_string()),
            },
        });
        report.record(JobOutcome {
            index: 1,
            job_name: "GraphConv_Adam_energy_1_basis_free".to_string(),
            status: OutcomeStatus::Failed {
                error: "`bsub` exited with status 255".to_string(),
            },
        });

        let text = ReportSummary(&report).to_string();
        assert!(text.contains("submitted  812      GraphConv_Adam_energy_0_basis_free"));
        assert!(text.contains("FAILED"));
        assert!(text.ends_with("1 of 3 submitted, 1 failed, 1 skipped\n"));
    }
}
