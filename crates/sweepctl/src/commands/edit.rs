//! Commands that write the sweep file

use std::io::Write;
use std::path::Path;

use sweepctl_core::AxisName;

use crate::storage::{init_sweep, load_sweep, save_sweep};

/// Write a default sweep file
pub fn init(path: &Path, force: bool, out: &mut impl Write) -> color_eyre::Result<()> {
    let config = init_sweep(path, force)?;
    tracing::info!(path = %path.display(), "Wrote default sweep file");
    writeln!(
        out,
        "wrote {} ({} job(s) enabled)",
        path.display(),
        config.total_jobs()
    )?;
    Ok(())
}

/// Enable or disable one value on one axis and save the file
pub fn set_enabled(
    path: &Path,
    axis: &str,
    value: &str,
    enabled: bool,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let axis: AxisName = axis.parse()?;
    let mut config = load_sweep(path)?;

    let changed = config.axes.set_enabled(axis, value, enabled)?;
    let state = if enabled { "enabled" } else { "disabled" };
    if changed {
        save_sweep(path, &config)?;
        tracing::info!(%axis, value, state, "Updated sweep axis");
    }

    writeln!(
        out,
        "{axis} {value}: {state}{} ({} job(s))",
        if changed { "" } else { " (unchanged)" },
        config.total_jobs()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_enable_then_disable_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        let mut out = Vec::new();
        init(&path, false, &mut out).unwrap();

        set_enabled(&path, "activation", "tanh", true, &mut out).unwrap();
        set_enabled(&path, "repeat", "1", true, &mut out).unwrap();
        assert_eq!(load_sweep(&path).unwrap().total_jobs(), 4);

        set_enabled(&path, "activation", "tanh", false, &mut out).unwrap();
        let config = load_sweep(&path).unwrap();
        assert_eq!(config.total_jobs(), 2);
        assert_eq!(config.axes.activation.candidates().len(), 4);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("activation tanh: enabled (2 job(s))"));
        assert!(text.contains("activation tanh: disabled (2 job(s))"));
    }

    #[test]
    fn test_unchanged_value_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        let mut out = Vec::new();
        init(&path, false, &mut out).unwrap();

        set_enabled(&path, "layer", "GraphConv", true, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("layer GraphConv: enabled (unchanged) (1 job(s))"));
    }

    #[test]
    fn test_rejects_unknown_axis_and_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        let mut out = Vec::new();
        init(&path, false, &mut out).unwrap();

        assert!(set_enabled(&path, "depth", "3", true, &mut out).is_err());
        assert!(set_enabled(&path, "metric", "loss", false, &mut out).is_err());
        assert!(set_enabled(&path, "units", "wide", true, &mut out).is_err());
    }
}
