//! Sweep axes and their candidate values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{GridIndices, grid_len};

use super::job::JobSpec;

/// One hyperparameter dimension of the sweep.
///
/// Variants are listed in nesting order: `Units` is the outermost (slowest
/// varying) axis and `Repeat` the innermost (fastest varying).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisName {
    Units,
    Activation,
    Layer,
    Optimizer,
    Metric,
    Repeat,
}

impl AxisName {
    /// All axes in nesting order
    pub const ALL: [AxisName; 6] = [
        AxisName::Units,
        AxisName::Activation,
        AxisName::Layer,
        AxisName::Optimizer,
        AxisName::Metric,
        AxisName::Repeat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AxisName::Units => "units",
            AxisName::Activation => "activation",
            AxisName::Layer => "layer",
            AxisName::Optimizer => "optimizer",
            AxisName::Metric => "metric",
            AxisName::Repeat => "repeat",
        }
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AxisName::ALL
            .into_iter()
            .find(|axis| axis.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownAxis(s.to_string()))
    }
}

fn enabled_by_default() -> bool {
    true
}

/// A candidate value on an axis. Disabled candidates stay in the
/// configuration but take no part in the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate<T> {
    pub value: T,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// Ordered candidate values for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axis<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T> Default for Axis<T> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> Axis<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis whose candidates are all enabled, in the given order
    pub fn from_enabled(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            candidates: values
                .into_iter()
                .map(|value| Candidate {
                    value,
                    enabled: true,
                })
                .collect(),
        }
    }

    /// Append a candidate
    pub fn with_candidate(mut self, value: T, enabled: bool) -> Self {
        self.candidates.push(Candidate { value, enabled });
        self
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// Enabled values in declaration order
    pub fn enabled_values(&self) -> Vec<T> {
        self.candidates
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.value.clone())
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.enabled).count()
    }

    /// Enable `value`, appending it if the axis does not list it yet.
    /// Returns whether anything changed.
    pub fn enable(&mut self, value: T) -> bool {
        match self.candidates.iter_mut().find(|c| c.value == value) {
            Some(candidate) if candidate.enabled => false,
            Some(candidate) => {
                candidate.enabled = true;
                true
            }
            None => {
                self.candidates.push(Candidate {
                    value,
                    enabled: true,
                });
                true
            }
        }
    }

    /// Disable `value`. Returns `None` when the axis does not list it,
    /// otherwise whether anything changed.
    pub fn disable(&mut self, value: &T) -> Option<bool> {
        let candidate = self.candidates.iter_mut().find(|c| &c.value == value)?;
        let changed = candidate.enabled;
        candidate.enabled = false;
        Some(changed)
    }

    /// First value listed more than once, if any
    fn first_duplicate(&self) -> Option<&T> {
        self.candidates.iter().enumerate().find_map(|(i, c)| {
            self.candidates[..i]
                .iter()
                .any(|prev| prev.value == c.value)
                .then_some(&c.value)
        })
    }
}

/// Display form of one axis for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSummary {
    pub name: AxisName,
    /// (value, enabled) in declaration order
    pub candidates: Vec<(String, bool)>,
}

impl AxisSummary {
    pub fn enabled_count(&self) -> usize {
        self.candidates.iter().filter(|(_, enabled)| *enabled).count()
    }
}

fn summarize<T: ToString>(name: AxisName, axis: &Axis<T>) -> AxisSummary {
    AxisSummary {
        name,
        candidates: axis
            .candidates
            .iter()
            .map(|c| (c.value.to_string(), c.enabled))
            .collect(),
    }
}

/// The six sweep axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepAxes {
    /// Hidden width, repeated through `--config`
    pub units: Axis<u32>,
    /// Activation paired with `units` in `--config`
    pub activation: Axis<String>,
    /// Graph layer type (`--layer`)
    pub layer: Axis<String>,
    /// Optimizer name (`--opt`)
    pub optimizer: Axis<String>,
    /// Training metric (`--metric`)
    pub metric: Axis<String>,
    /// Repeat index, only used in the output name
    pub repeat: Axis<u32>,
}

fn string_axis(enabled: &str, disabled: &[&str]) -> Axis<String> {
    disabled.iter().fold(
        Axis::from_enabled([enabled.to_string()]),
        |axis, value| axis.with_candidate(value.to_string(), false),
    )
}

impl Default for SweepAxes {
    /// One enabled value per axis, with the usual alternatives listed but
    /// disabled.
    fn default() -> Self {
        Self {
            units: Axis::from_enabled([128])
                .with_candidate(32, false)
                .with_candidate(64, false)
                .with_candidate(256, false)
                .with_candidate(512, false),
            activation: string_axis("sigmoid", &["tanh", "relu", "leaky_relu"]),
            layer: string_axis(
                "GraphConv",
                &["SAGEConv", "GINConv", "EdgeConv", "SGConv", "TAGConv"],
            ),
            optimizer: string_axis("Adam", &["SGD", "Adagrad", "RMSprop"]),
            metric: string_axis("energy", &["param", "force"]),
            repeat: Axis::from_enabled([0])
                .with_candidate(1, false)
                .with_candidate(2, false)
                .with_candidate(3, false)
                .with_candidate(4, false),
        }
    }
}

fn parse_count(axis: AxisName, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidValue {
            axis,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Labels end up as single shell words in the training argv and output name
fn check_label(axis: AxisName, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            axis,
            value: value.to_string(),
            reason: "must be a single non-empty word".to_string(),
        });
    }
    Ok(())
}

fn parse_label(axis: AxisName, raw: &str) -> Result<String, ConfigError> {
    let value = raw.trim();
    check_label(axis, value).map_err(|_| ConfigError::InvalidValue {
        axis,
        value: raw.to_string(),
        reason: "must be a single non-empty word".to_string(),
    })?;
    Ok(value.to_string())
}

impl SweepAxes {
    /// Enabled-value count per axis, in nesting order
    pub fn shape(&self) -> [usize; 6] {
        [
            self.units.enabled_count(),
            self.activation.enabled_count(),
            self.layer.enabled_count(),
            self.optimizer.enabled_count(),
            self.metric.enabled_count(),
            self.repeat.enabled_count(),
        ]
    }

    /// Number of jobs the sweep produces
    pub fn total_jobs(&self) -> usize {
        grid_len(&self.shape())
    }

    /// All job specs in nesting order (repeat fastest, units slowest)
    pub fn jobs(&self) -> impl Iterator<Item = JobSpec> + use<> {
        let units = self.units.enabled_values();
        let activation = self.activation.enabled_values();
        let layer = self.layer.enabled_values();
        let optimizer = self.optimizer.enabled_values();
        let metric = self.metric.enabled_values();
        let repeat = self.repeat.enabled_values();

        GridIndices::new(&self.shape())
            .enumerate()
            .map(move |(index, ix)| JobSpec {
                index,
                units: units[ix[0]],
                activation: activation[ix[1]].clone(),
                layer: layer[ix[2]].clone(),
                optimizer: optimizer[ix[3]].clone(),
                metric: metric[ix[4]].clone(),
                repeat: repeat[ix[5]],
            })
    }

    /// Listing of every axis in nesting order
    pub fn summaries(&self) -> Vec<AxisSummary> {
        vec![
            summarize(AxisName::Units, &self.units),
            summarize(AxisName::Activation, &self.activation),
            summarize(AxisName::Layer, &self.layer),
            summarize(AxisName::Optimizer, &self.optimizer),
            summarize(AxisName::Metric, &self.metric),
            summarize(AxisName::Repeat, &self.repeat),
        ]
    }

    /// Enable or disable a value given in text form.
    /// Returns whether the axes changed.
    pub fn set_enabled(
        &mut self,
        axis: AxisName,
        raw: &str,
        enabled: bool,
    ) -> Result<bool, ConfigError> {
        let found = match axis {
            AxisName::Units => toggle(&mut self.units, parse_count(axis, raw)?, enabled),
            AxisName::Repeat => toggle(&mut self.repeat, parse_count(axis, raw)?, enabled),
            AxisName::Activation => {
                toggle(&mut self.activation, parse_label(axis, raw)?, enabled)
            }
            AxisName::Layer => toggle(&mut self.layer, parse_label(axis, raw)?, enabled),
            AxisName::Optimizer => toggle(&mut self.optimizer, parse_label(axis, raw)?, enabled),
            AxisName::Metric => toggle(&mut self.metric, parse_label(axis, raw)?, enabled),
        };
        found.ok_or_else(|| ConfigError::UnknownValue {
            axis,
            value: raw.trim().to_string(),
        })
    }

    /// Every axis needs at least one enabled value and no repeated values.
    /// String candidates must be single non-empty words.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_axis(AxisName::Units, &self.units)?;
        check_labels(AxisName::Activation, &self.activation)?;
        check_labels(AxisName::Layer, &self.layer)?;
        check_labels(AxisName::Optimizer, &self.optimizer)?;
        check_labels(AxisName::Metric, &self.metric)?;
        check_axis(AxisName::Repeat, &self.repeat)?;
        Ok(())
    }
}

fn toggle<T: Clone + PartialEq>(axis: &mut Axis<T>, value: T, enabled: bool) -> Option<bool> {
    if enabled {
        Some(axis.enable(value))
    } else {
        axis.disable(&value)
    }
}

fn check_axis<T: Clone + PartialEq + ToString>(
    name: AxisName,
    axis: &Axis<T>,
) -> Result<(), ConfigError> {
    if let Some(value) = axis.first_duplicate() {
        return Err(ConfigError::DuplicateCandidate {
            axis: name,
            value: value.to_string(),
        });
    }
    if axis.enabled_count() == 0 {
        return Err(ConfigError::EmptyAxis(name));
    }
    Ok(())
}

fn check_labels(name: AxisName, axis: &Axis<String>) -> Result<(), ConfigError> {
    for candidate in axis.candidates() {
        check_label(name, &candidate.value)?;
    }
    check_axis(name, axis)
}
