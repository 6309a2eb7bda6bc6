use crate::data::{Catalog, ClimbStorage, ClimbStore, FileStorage, persistence::get_data_dir};
use anyhow::{Result, bail};

pub fn run(id: &str) -> Result<()> {
    let catalog = Catalog::load()?;
    let mut store = ClimbStore::open(FileStorage::new(get_data_dir()?));
    toggle_and_report(&catalog, &mut store, id, &mut std::io::stdout())
}

/// Flips one peak through the store and prints its new status. Ids outside
/// the catalog are rejected rather than recorded.
pub(crate) fn toggle_and_report<S: ClimbStorage, W: std::io::Write>(
    catalog: &Catalog,
    store: &mut ClimbStore<S>,
    id: &str,
    out: &mut W,
) -> Result<()> {
    let Some(peak) = catalog.get(id) else {
        bail!("Peak '{}' not found in catalog.", id);
    };

    let climbed = store.toggle(&peak.id);
    if let Some(err) = store.last_save_error() {
        bail!("Could not save climb record: {}", err);
    }

    let status = if climbed { "climbed" } else { "not climbed" };
    writeln!(out, "#{} {} ({}m) marked {}.", peak.rank, peak.name, peak.height, status)?;
    Ok(())
}
