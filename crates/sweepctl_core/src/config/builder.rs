//! Fluent builder for sweep configurations
//!
//! Starts from [`SweepConfig::default`] and replaces whole axes or resource
//! fields. Axis setters enable every value they are given.
//!
//! ```ignore
//! let config = SweepBuilder::new()
//!     .units([64, 128])
//!     .activations(["tanh"])
//!     .repeats(0..3)
//!     .scheduler(SchedulerKind::Slurm)
//!     .queue("gpu")
//!     .build();
//! ```

use jiff::SignedDuration;

use crate::model::{Axis, GpuRequest};
use crate::scheduler::SchedulerKind;

use super::{FailurePolicy, SweepConfig};

#[derive(Debug, Clone, Default)]
pub struct SweepBuilder {
    config: SweepConfig,
}

fn strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Axis<String> {
    Axis::from_enabled(values.into_iter().map(Into::into))
}

impl SweepBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.config.axes.units = Axis::from_enabled(values);
        self
    }

    pub fn activations<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.config.axes.activation = strings(values);
        self
    }

    pub fn layers<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.config.axes.layer = strings(values);
        self
    }

    pub fn optimizers<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.config.axes.optimizer = strings(values);
        self
    }

    pub fn metrics<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.config.axes.metric = strings(values);
        self
    }

    pub fn repeats(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.config.axes.repeat = Axis::from_enabled(values);
        self
    }

    pub fn scheduler(mut self, kind: SchedulerKind) -> Self {
        self.config.scheduler = kind;
        self
    }

    pub fn queue(mut self, queue: impl Into<String>) -> Self {
        self.config.resources.queue = queue.into();
        self
    }

    pub fn nodes(mut self, nodes: u32) -> Self {
        self.config.resources.nodes = nodes;
        self
    }

    pub fn gpus(mut self, count: u32, exclusive: bool) -> Self {
        self.config.resources.gpu = GpuRequest { count, exclusive };
        self
    }

    pub fn memory_gb(mut self, memory_gb: u32) -> Self {
        self.config.resources.memory_gb = memory_gb;
        self
    }

    pub fn wall_clock(mut self, limit: SignedDuration) -> Self {
        self.config.resources.wall_clock = limit;
        self
    }

    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.config.program.script = script.into();
        self
    }

    pub fn epochs(mut self, n_epochs: u32) -> Self {
        self.config.program.n_epochs = n_epochs;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn build(self) -> SweepConfig {
        self.config
    }
}
