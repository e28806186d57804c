//! Sweep file storage
//!
//! A sweep lives in a single YAML document (`sweep.yaml` by default):
//!
//! ```yaml
//! scheduler: lsf
//! failure_policy: continue
//! resources:
//!   queue: gpuqueue
//!   nodes: 1
//!   gpu: { count: 1, exclusive: true }
//!   memory_gb: 4
//!   wall_clock: 59m
//!   stdout: "{jobid}.stdout"
//!   stderr: "{jobid}.stderr"
//! program:
//!   interpreter: python
//!   script: basis_free.py
//!   n_epochs: 10000
//! axes:
//!   units:
//!     - value: 128
//!     - value: 256
//!       enabled: false
//!   ...
//! ```
//!
//! Every section is optional; missing fields take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sweepctl_core::SweepConfig;

use crate::util::io::atomic_write;

pub const DEFAULT_SWEEP_FILE: &str = "sweep.yaml";

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    NotFound(PathBuf),
    AlreadyExists(PathBuf),
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound(path) => write!(
                f,
                "sweep file {} not found (run `sweepctl init` to create one)",
                path.display()
            ),
            StorageError::AlreadyExists(path) => write!(
                f,
                "sweep file {} already exists (use --force to overwrite)",
                path.display()
            ),
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Parse a sweep document
pub fn sweep_from_yaml(yaml: &str) -> Result<SweepConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

/// Render a sweep document
pub fn sweep_to_yaml(config: &SweepConfig) -> Result<String, serde_saphyr::ser::Error> {
    serde_saphyr::to_string(config)
}

/// Load the sweep file at `path`
pub fn load_sweep(path: &Path) -> Result<SweepConfig, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
        _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let config = sweep_from_yaml(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), jobs = config.total_jobs(), "Loaded sweep file");
    Ok(config)
}

/// Write the sweep file at `path`, replacing any previous content
pub fn save_sweep(path: &Path, config: &SweepConfig) -> Result<(), StorageError> {
    let yaml = sweep_to_yaml(config)
        .map_err(|e| StorageError::Serialize(format!("Failed to serialize sweep: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            StorageError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    atomic_write(path, &yaml)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), "Saved sweep file");
    Ok(())
}

/// Write a default sweep file, refusing to clobber an existing one unless
/// `force` is set
pub fn init_sweep(path: &Path, force: bool) -> Result<SweepConfig, StorageError> {
    if path.exists() && !force {
        return Err(StorageError::AlreadyExists(path.to_path_buf()));
    }
    let config = SweepConfig::default();
    save_sweep(path, &config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use sweepctl_core::{AxisName, FailurePolicy, SchedulerKind};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_saved_sweep_loads_back_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sweep.yaml");

        let mut config = SweepConfig::default();
        config.scheduler = SchedulerKind::Slurm;
        config.failure_policy = FailurePolicy::Abort;
        config.axes.set_enabled(AxisName::Activation, "tanh", true).unwrap();

        save_sweep(&path, &config).unwrap();
        let loaded = load_sweep(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.total_jobs(), 2);
    }

    #[test]
    fn test_hand_written_yaml() {
        let yaml = r#"
scheduler: lsf
resources:
  queue: gpuqueue
  memory_gb: 8
  wall_clock: 1h 30m
axes:
  units:
    - value: 128
    - value: 256
      enabled: false
  activation:
    - value: sigmoid
    - value: tanh
  repeat:
    - value: 0
    - value: 1
    - value: 2
"#;
        let config = sweep_from_yaml(yaml).unwrap();

        assert_eq!(config.resources.memory_gb, 8);
        assert_eq!(config.resources.wall_clock_minutes(), 90);
        assert_eq!(config.axes.units.enabled_values(), vec![128]);
        assert_eq!(config.axes.shape(), [1, 2, 1, 1, 1, 3]);
        assert_eq!(config.total_jobs(), 6);
        assert_eq!(config.program.n_epochs, 10_000);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_sweep(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(err.to_string().contains("sweepctl init"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        fs::write(&path, "scheduler: pbs\n").unwrap();

        assert!(matches!(load_sweep(&path), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SWEEP_FILE);

        init_sweep(&path, false).unwrap();
        assert!(matches!(
            init_sweep(&path, false),
            Err(StorageError::AlreadyExists(_))
        ));
        assert!(init_sweep(&path, true).is_ok());
        assert_eq!(load_sweep(&path).unwrap(), SweepConfig::default());
    }
}
