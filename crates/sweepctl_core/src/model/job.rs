use serde::{Deserialize, Serialize};

use super::program::TrainingProgram;

/// Number of (width, activation) pairs passed through `--config`
pub const CONFIG_PAIRS: usize = 6;

/// Suffix appended to every output name
pub const OUTPUT_SUFFIX: &str = "basis_free";

/// Output identifier for one job: `{layer}_{opt}_{metric}_{repeat}_basis_free`
pub fn output_name(layer: &str, optimizer: &str, metric: &str, repeat: u32) -> String {
    format!("{layer}_{optimizer}_{metric}_{repeat}_{OUTPUT_SUFFIX}")
}

/// One combination of axis values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Position in the sweep (row-major)
    pub index: usize,
    pub units: u32,
    pub activation: String,
    pub layer: String,
    pub optimizer: String,
    pub metric: String,
    pub repeat: u32,
}

impl JobSpec {
    pub fn output_name(&self) -> String {
        output_name(&self.layer, &self.optimizer, &self.metric, self.repeat)
    }

    /// Flattened `--config` values: the (units, activation) pair repeated
    /// `CONFIG_PAIRS` times
    pub fn config_args(&self) -> Vec<String> {
        let width = self.units.to_string();
        (0..CONFIG_PAIRS)
            .flat_map(|_| [width.clone(), self.activation.clone()])
            .collect()
    }

    /// Flags passed to the training program
    pub fn program_flags(&self, n_epochs: u32) -> Vec<String> {
        let mut flags = vec!["--layer".to_string(), self.layer.clone()];
        flags.push("--config".to_string());
        flags.extend(self.config_args());
        flags.extend([
            "--metric".to_string(),
            self.metric.clone(),
            "--opt".to_string(),
            self.optimizer.clone(),
            "--out".to_string(),
            self.output_name(),
            "--n_epochs".to_string(),
            n_epochs.to_string(),
        ]);
        flags
    }

    /// Complete argv of the training invocation, interpreter first
    pub fn program_args(&self, program: &TrainingProgram) -> Vec<String> {
        let mut args = vec![program.interpreter.clone(), program.script.clone()];
        args.extend(self.program_flags(program.n_epochs));
        args
    }
}
