use crate::data::{
    AppSettings, Catalog, ClimbStore, FileStorage, Persistable, persistence::get_data_dir,
};
use crate::ui::app::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use tracing::info;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let catalog = Catalog::load()?;
    let store = ClimbStore::open(FileStorage::new(get_data_dir()?));

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    info!(peaks = catalog.len(), "starting tracker");

    let mut app = App::new(&catalog, store, &settings);
    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    if let Some(err) = app.store().last_save_error() {
        eprintln!("Warning: last change was not saved: {err}");
    }
    info!(climbed = app.view().stats.climbed, "tracker closed");

    result
}
