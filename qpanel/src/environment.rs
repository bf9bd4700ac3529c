use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "qpanel";

/// Get the path to a data file (the history storage slot lives here).
pub fn get_data_file(name: &str) -> Result<PathBuf> {
    let xdg_dir =
        xdg::BaseDirectories::with_prefix(APP_NAME).context("failed get xdg directory")?;
    xdg_dir.place_data_file(name).context("failed get path")
}

/// Get the path to a state file (e.g. logs).
pub fn get_state_file(name: &str) -> Result<PathBuf> {
    let xdg_dir =
        xdg::BaseDirectories::with_prefix(APP_NAME).context("failed get xdg directory")?;
    xdg_dir.place_state_file(name).context("failed get path")
}
