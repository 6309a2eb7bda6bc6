use crate::data::{AppSettings, ClimbState, Persistable};
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes default settings and an empty climb record into `dir`. Exposed for
/// unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    ClimbState::default().save_to(dir)?;
    info!(dir = %dir.display(), "data directory initialized");
    Ok(())
}
