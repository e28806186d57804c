//! Partial configuration documents and defaults

use jiff::SignedDuration;

use crate::config::{FailurePolicy, SweepBuilder, SweepConfig};
use crate::dispatch::plan;
use crate::error::ConfigError;
use crate::model::AxisName;
use crate::scheduler::SchedulerKind;

#[test]
fn test_empty_document_uses_defaults() {
    let config: SweepConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SweepConfig::default());
    assert!(config.validate().is_ok());
    assert_eq!(config.total_jobs(), 1);
}

#[test]
fn test_partial_document_overrides_only_named_fields() {
    let config: SweepConfig = serde_json::from_str(
        r#"{
            "scheduler": "slurm",
            "failure_policy": "abort",
            "resources": { "queue": "a100", "wall_clock": "2h 30m", "gpu": { "count": 2 } },
            "axes": {
                "activation": [
                    { "value": "sigmoid" },
                    { "value": "tanh", "enabled": false },
                    { "value": "relu", "enabled": true }
                ]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.scheduler, SchedulerKind::Slurm);
    assert_eq!(config.failure_policy, FailurePolicy::Abort);
    assert_eq!(config.resources.queue, "a100");
    assert_eq!(config.resources.memory_gb, 4);
    assert_eq!(config.resources.gpu.count, 2);
    assert!(config.resources.gpu.exclusive);
    assert_eq!(
        config.resources.wall_clock,
        SignedDuration::from_mins(150)
    );
    assert_eq!(
        config.axes.activation.enabled_values(),
        vec!["sigmoid".to_string(), "relu".to_string()]
    );
    // Untouched axes keep their defaults
    assert_eq!(config.axes.units.enabled_values(), vec![128]);
    assert_eq!(config.total_jobs(), 2);
}

#[test]
fn test_loaded_labels_must_be_single_words() {
    let config: SweepConfig = serde_json::from_str(
        r#"{"axes":{"activation":[{"value":"tanh relu"}],"layer":[{"value":""}]}}"#,
    )
    .unwrap();

    let expected = ConfigError::InvalidValue {
        axis: AxisName::Activation,
        value: "tanh relu".to_string(),
        reason: "must be a single non-empty word".to_string(),
    };
    assert_eq!(config.validate(), Err(expected.clone()));
    assert_eq!(plan(&config).unwrap_err(), expected);
}

#[test]
fn test_disabled_labels_are_checked_too() {
    let config: SweepConfig = serde_json::from_str(
        r#"{"axes":{"metric":[{"value":"energy"},{"value":" force","enabled":false}]}}"#,
    )
    .unwrap();

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { axis: AxisName::Metric, .. })
    ));
}

#[test]
fn test_builder_labels_are_checked() {
    let config = SweepBuilder::new().layers(["GraphConv", ""]).build();

    assert!(matches!(
        plan(&config),
        Err(ConfigError::InvalidValue { axis: AxisName::Layer, .. })
    ));
}

#[test]
fn test_serialized_axes_keep_disabled_candidates() {
    let value = serde_json::to_value(SweepConfig::default()).unwrap();
    let layers = value["axes"]["layer"].as_array().unwrap();

    assert_eq!(layers[0]["value"], "GraphConv");
    assert_eq!(layers[0]["enabled"], true);
    assert!(layers[1..].iter().all(|c| c["enabled"] == false));
    assert_eq!(value["scheduler"], "lsf");
    assert_eq!(value["failure_policy"], "continue");
}

#[test]
fn test_axis_names_serialize_lowercase() {
    let names: Vec<String> = AxisName::ALL
        .iter()
        .map(|a| serde_json::to_value(a).unwrap().as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["units", "activation", "layer", "optimizer", "metric", "repeat"]
    );
}
