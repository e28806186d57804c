use std::io::Write;

use sweepctl_core::SweepConfig;

use super::render::AxesListing;

/// Print every axis with its candidates, then the grid shape
pub fn show_axes(config: &SweepConfig, out: &mut impl Write) -> color_eyre::Result<()> {
    write!(out, "{}", AxesListing(&config.axes))?;
    Ok(())
}
