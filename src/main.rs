//! Binary entry point: find the data files, load the store, and hand it to
//! the menu. Nothing here is fatal; problems are reported once and the
//! program carries on with whatever it could load.
use std::env;
use std::path::PathBuf;

use log::LevelFilter;
use tv_schedule_manager::{run_menu, DataFiles, RecordStore};

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .format_timestamp(None)
        .init();

    let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let files = DataFiles::discover(&base);

    match files.ensure_tables() {
        Ok(created) => {
            for path in created {
                println!("Created new file: {}", path.display());
            }
        }
        Err(err) => log::error!("could not create data files: {err:#}"),
    }

    let store = RecordStore::open_best_effort(files);

    if let Err(err) = run_menu(store) {
        log::error!("{err:#}");
    }
}
