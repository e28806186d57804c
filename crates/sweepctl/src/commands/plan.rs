use std::io::Write;

use clap::ValueEnum;
use sweepctl_core::{SweepConfig, plan};

use super::render::PlanListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlanFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Print every job and its submission command without running anything
pub fn show_plan(
    config: &SweepConfig,
    format: PlanFormat,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let jobs = plan(config)?;
    match format {
        PlanFormat::Text => write!(out, "{}", PlanListing(&jobs))?,
        PlanFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&jobs)?)?,
        PlanFormat::Yaml => write!(out, "{}", serde_saphyr::to_string(&jobs)?)?,
    }
    Ok(())
}
