use std::io::{self, Write};
use std::process::Command;

use crate::error::SubmitError;
use crate::scheduler::SubmitCommand;

/// What the scheduler printed when it accepted a job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutput {
    pub stdout: String,
}

/// Runs submission commands, one at a time
pub trait Submitter {
    fn submit(&mut self, command: &SubmitCommand) -> Result<SubmitOutput, SubmitError>;
}

/// Runs each command as a child process and waits for it to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSubmitter {
    /// Forward the scheduler's stdout/stderr to our own
    pub echo: bool,
}

impl ProcessSubmitter {
    pub fn echoing() -> Self {
        Self { echo: true }
    }
}

impl Submitter for ProcessSubmitter {
    fn submit(&mut self, command: &SubmitCommand) -> Result<SubmitOutput, SubmitError> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|source| SubmitError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if self.echo {
            // Best effort: a closed pipe must not turn into a failed submission
            let _ = io::stdout().write_all(&output.stdout);
            let _ = io::stderr().write_all(&output.stderr);
        }

        if !output.status.success() {
            return Err(SubmitError::Rejected {
                program: command.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(SubmitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Records commands without running them
#[derive(Debug, Clone, Default)]
pub struct DryRunSubmitter {
    submitted: Vec<SubmitCommand>,
}

impl DryRunSubmitter {
    pub fn submitted(&self) -> &[SubmitCommand] {
        &self.submitted
    }
}

impl Submitter for DryRunSubmitter {
    fn submit(&mut self, command: &SubmitCommand) -> Result<SubmitOutput, SubmitError> {
        self.submitted.push(command.clone());
        Ok(SubmitOutput::default())
    }
}
