use serde::Serialize;

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Accepted by the scheduler. The id is present when the reply could be parsed.
    Submitted { job_id: Option<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub index: usize,
    pub job_name: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl JobOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self.status, OutcomeStatus::Submitted { .. })
    }
}

/// Per-job outcomes of one dispatch pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Jobs in the sweep, attempted or not
    pub planned: usize,
    pub outcomes: Vec<JobOutcome>,
}

impl DispatchReport {
    pub fn new(planned: usize) -> Self {
        Self {
            planned,
            outcomes: Vec::with_capacity(planned),
        }
    }

    pub fn record(&mut self, outcome: JobOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn submitted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_submitted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.submitted_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| !o.is_submitted())
    }

    /// Jobs never attempted because the sweep stopped early
    pub fn skipped_count(&self) -> usize {
        self.planned.saturating_sub(self.outcomes.len())
    }

    pub fn all_submitted(&self) -> bool {
        self.outcomes.len() == self.planned && self.failed_count() == 0
    }
}
