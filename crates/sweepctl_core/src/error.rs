use std::fmt;
use std::io;

use crate::dispatch::DispatchReport;
use crate::model::AxisName;

/// Errors found while validating or editing a sweep configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An axis has no enabled values, so the sweep would be empty
    EmptyAxis(AxisName),
    /// The same value is listed twice on one axis
    DuplicateCandidate { axis: AxisName, value: String },
    /// A raw value could not be parsed for the axis type
    InvalidValue {
        axis: AxisName,
        value: String,
        reason: String,
    },
    /// Disabling a value the axis does not list
    UnknownValue { axis: AxisName, value: String },
    /// Axis name not recognized
    UnknownAxis(String),
    InvalidResource {
        field: &'static str,
        reason: &'static str,
    },
    InvalidProgram {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyAxis(axis) => write!(f, "axis `{axis}` has no enabled values"),
            ConfigError::DuplicateCandidate { axis, value } => {
                write!(f, "axis `{axis}` lists `{value}` more than once")
            }
            ConfigError::InvalidValue {
                axis,
                value,
                reason,
            } => write!(f, "invalid value `{value}` for axis `{axis}`: {reason}"),
            ConfigError::UnknownValue { axis, value } => {
                write!(f, "axis `{axis}` has no candidate `{value}`")
            }
            ConfigError::UnknownAxis(name) => write!(
                f,
                "unknown axis `{name}` (expected one of: units, activation, layer, optimizer, metric, repeat)"
            ),
            ConfigError::InvalidResource { field, reason } => {
                write!(f, "invalid resource request `{field}`: {reason}")
            }
            ConfigError::InvalidProgram { field, reason } => {
                write!(f, "invalid training program `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors from a single submission call
#[derive(Debug)]
pub enum SubmitError {
    /// The submission program could not be started
    Spawn { program: String, source: io::Error },
    /// The scheduler ran but refused the job
    Rejected {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Spawn { program, source } => {
                write!(f, "failed to run `{program}`: {source}")
            }
            SubmitError::Rejected {
                program,
                code,
                stderr,
            } => {
                match code {
                    Some(code) => write!(f, "`{program}` exited with status {code}")?,
                    None => write!(f, "`{program}` was terminated by a signal")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Spawn { source, .. } => Some(source),
            SubmitError::Rejected { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum DispatchError {
    Config(ConfigError),
    /// A submission failed under the abort policy. The report holds every
    /// outcome up to and including the failed job.
    Aborted {
        report: Box<DispatchReport>,
        job: String,
        source: SubmitError,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Config(e) => write!(f, "{e}"),
            DispatchError::Aborted {
                report,
                job,
                source,
            } => write!(
                f,
                "sweep aborted at job `{job}` after {} of {} submissions: {source}",
                report.submitted_count(),
                report.planned
            ),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Config(e) => Some(e),
            DispatchError::Aborted { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for DispatchError {
    fn from(err: ConfigError) -> Self {
        DispatchError::Config(err)
    }
}
