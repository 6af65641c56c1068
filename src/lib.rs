//! Core library surface for the TV schedule manager.
//!
//! Shows and channels live in a [`RecordStore`] backed by two flat text
//! files; the `ui` module wraps it in a numbered console menu. The binary in
//! `main.rs` only wires the pieces together.
pub mod db;
pub mod error;
pub mod models;
pub mod store;
pub mod table;
pub mod ui;

/// Persistence entry points used at startup.
pub use db::{ensure_exists, DataFiles};

pub use error::{RecordKind, StoreError};

/// The two record types and the time value shows are scheduled by.
pub use models::{Channel, Show, StartTime};

pub use store::{ChannelPatch, RecordStore, ShowDraft, ShowPatch};

/// The interactive menu entry point.
pub use ui::{run_menu, Console, Menu};
