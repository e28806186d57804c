use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The external training program each job runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingProgram {
    pub interpreter: String,
    pub script: String,
    pub n_epochs: u32,
}

impl Default for TrainingProgram {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            script: "basis_free.py".to_string(),
            n_epochs: 10_000,
        }
    }
}

impl TrainingProgram {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interpreter.trim().is_empty() {
            return Err(ConfigError::InvalidProgram {
                field: "interpreter",
                reason: "must not be empty",
            });
        }
        if self.script.trim().is_empty() {
            return Err(ConfigError::InvalidProgram {
                field: "script",
                reason: "must not be empty",
            });
        }
        if self.n_epochs == 0 {
            return Err(ConfigError::InvalidProgram {
                field: "n_epochs",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
