//! Line-based front-end: a numbered menu over the record store.

mod helpers;
mod menu;
mod prompts;
mod terminal;

use anyhow::Result;

use crate::store::RecordStore;

pub use menu::{Menu, MenuChoice};
pub use terminal::{Console, StatusKind};

/// Run the menu on stdin/stdout until the user exits.
pub fn run_menu(store: RecordStore) -> Result<()> {
    let mut menu = Menu::new(store, Console::stdio());
    menu.run()
}
