//! Workload manager backends.
//!
//! A [`Scheduler`] renders one job into the command line that submits it
//! (`bsub ...` or `sbatch ...`) and recognizes the job id in the scheduler's
//! reply. Running the command is left to a [`Submitter`](crate::dispatch::Submitter).

mod lsf;
mod slurm;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ResourceRequest;

pub use lsf::Lsf;
pub use slurm::Slurm;

/// A fully rendered submission command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for SubmitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

pub trait Scheduler {
    /// Submission program (`bsub`, `sbatch`)
    fn program(&self) -> &'static str;

    /// Token the scheduler substitutes with the job id in log paths
    fn job_id_token(&self) -> &'static str;

    /// Build the submission command for one job
    fn render(
        &self,
        resources: &ResourceRequest,
        job_name: &str,
        command: &[String],
    ) -> SubmitCommand;

    /// Extract the job id from the scheduler's reply on stdout
    fn parse_job_id(&self, stdout: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    #[default]
    Lsf,
    Slurm,
}

impl SchedulerKind {
    pub fn backend(self) -> &'static dyn Scheduler {
        match self {
            SchedulerKind::Lsf => &Lsf,
            SchedulerKind::Slurm => &Slurm,
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerKind::Lsf => f.write_str("lsf"),
            SchedulerKind::Slurm => f.write_str("slurm"),
        }
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_-./:=%@+,".contains(c)
}

/// Quote a word for a POSIX shell, leaving plain words untouched
pub fn shell_quote(word: &str) -> String {
    if !word.is_empty() && word.chars().all(is_shell_safe) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// Join words into a single shell command line
pub fn shell_join(words: &[String]) -> String {
    words
        .iter()
        .map(|w| shell_quote(w))
        .collect::<Vec<_>>()
        .join(" ")
}
