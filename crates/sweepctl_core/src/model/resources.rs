//! Cluster resource request shared by every job of a sweep.

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Placeholder in log path templates, replaced by the scheduler's job-id token
pub const JOB_ID_PLACEHOLDER: &str = "{jobid}";

/// GPU allocation per job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuRequest {
    /// Zero requests no GPU at all
    pub count: u32,
    /// Exclusive process mode on the allocated devices
    pub exclusive: bool,
}

impl Default for GpuRequest {
    fn default() -> Self {
        Self {
            count: 1,
            exclusive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRequest {
    pub queue: String,
    pub nodes: u32,
    pub gpu: GpuRequest,
    pub memory_gb: u32,
    /// Forwarded to the scheduler, never enforced locally.
    /// Accepts `59m`, `1h 30m` or ISO 8601 (`PT59M`).
    pub wall_clock: SignedDuration,
    /// stdout path template, may contain `{jobid}`
    pub stdout: String,
    /// stderr path template, may contain `{jobid}`
    pub stderr: String,
}

impl Default for ResourceRequest {
    fn default() -> Self {
        Self {
            queue: "gpuqueue".to_string(),
            nodes: 1,
            gpu: GpuRequest::default(),
            memory_gb: 4,
            wall_clock: SignedDuration::from_mins(59),
            stdout: format!("{JOB_ID_PLACEHOLDER}.stdout"),
            stderr: format!("{JOB_ID_PLACEHOLDER}.stderr"),
        }
    }
}

impl ResourceRequest {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue.trim().is_empty() {
            return Err(ConfigError::InvalidResource {
                field: "queue",
                reason: "must not be empty",
            });
        }
        if self.nodes == 0 {
            return Err(ConfigError::InvalidResource {
                field: "nodes",
                reason: "must be at least 1",
            });
        }
        if self.memory_gb == 0 {
            return Err(ConfigError::InvalidResource {
                field: "memory_gb",
                reason: "must be at least 1",
            });
        }
        if self.wall_clock < SignedDuration::from_mins(1) {
            return Err(ConfigError::InvalidResource {
                field: "wall_clock",
                reason: "must be at least one minute",
            });
        }
        if self.stdout.trim().is_empty() {
            return Err(ConfigError::InvalidResource {
                field: "stdout",
                reason: "must not be empty",
            });
        }
        if self.stderr.trim().is_empty() {
            return Err(ConfigError::InvalidResource {
                field: "stderr",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Wall-clock limit in whole minutes, rounded up
    pub fn wall_clock_minutes(&self) -> i64 {
        let secs = self.wall_clock.as_secs();
        let partial = secs % 60 != 0 || self.wall_clock.subsec_nanos() != 0;
        secs / 60 + i64::from(partial)
    }

    /// stdout path with the job-id placeholder replaced by `token`
    pub fn stdout_path(&self, token: &str) -> String {
        self.stdout.replace(JOB_ID_PLACEHOLDER, token)
    }

    /// stderr path with the job-id placeholder replaced by `token`
    pub fn stderr_path(&self, token: &str) -> String {
        self.stderr.replace(JOB_ID_PLACEHOLDER, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_is_valid() {
        let request = ResourceRequest::default();
        assert!(request.validate().is_ok());
        assert_eq!(request.wall_clock_minutes(), 59);
    }

    #[test]
    fn test_wall_clock_rounds_up_to_minutes() {
        let request = ResourceRequest {
            wall_clock: SignedDuration::from_secs(90 * 60 + 1),
            ..Default::default()
        };
        assert_eq!(request.wall_clock_minutes(), 91);
    }

    #[test]
    fn test_validate_rejects_short_wall_clock() {
        let request = ResourceRequest {
            wall_clock: SignedDuration::from_secs(30),
            ..Default::default()
        };
        assert_eq!(
            request.validate(),
            Err(ConfigError::InvalidResource {
                field: "wall_clock",
                reason: "must be at least one minute",
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_memory() {
        let request = ResourceRequest {
            memory_gb: 0,
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ConfigError::InvalidResource { field: "memory_gb", .. })
        ));
    }

    #[test]
    fn test_log_paths_substitute_job_id() {
        let request = ResourceRequest {
            stdout: "logs/{jobid}.out".to_string(),
            ..Default::default()
        };
        assert_eq!(request.stdout_path("%J"), "logs/%J.out");
        assert_eq!(request.stderr_path("%j"), "%j.stderr");
    }
}
