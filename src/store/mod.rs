//! The in-memory record store. It owns both collections, enforces the
//! uniqueness and channel-reference rules, and writes the backing files after
//! every mutation so a restart sees the same data.

mod channels;
mod queries;
mod shows;

use anyhow::Result;

use crate::db::{load_channels, load_shows, DataFiles};
use crate::error::{RecordKind, StoreError};
use crate::models::{encode_text, Channel, Show};

pub use channels::ChannelPatch;
pub use queries::DurationExtreme;
pub use shows::{ShowDraft, ShowPatch};

/// Authoritative collections of shows and channels plus the files that back
/// them. Records keep insertion order.
#[derive(Debug)]
pub struct RecordStore {
    shows: Vec<Show>,
    channels: Vec<Channel>,
    files: DataFiles,
}

impl RecordStore {
    /// Empty store writing to `files`. Nothing is read from disk.
    pub fn new(files: DataFiles) -> Self {
        Self::from_parts(files, Vec::new(), Vec::new())
    }

    /// Store seeded with existing records, e.g. for tests.
    pub fn from_parts(files: DataFiles, shows: Vec<Show>, channels: Vec<Channel>) -> Self {
        Self {
            shows,
            channels,
            files,
        }
    }

    /// Load both tables from `files`. Malformed rows are skipped with a
    /// warning; only I/O failures are returned.
    pub fn open(files: DataFiles) -> Result<Self> {
        let shows = load_shows(&files.shows)?;
        let channels = load_channels(&files.channels)?;
        log::info!(
            "loaded {} shows and {} channels",
            shows.len(),
            channels.len()
        );
        Ok(Self::from_parts(files, shows, channels))
    }

    /// Load each table on its own. A table that cannot be read is logged and
    /// starts empty; the other one keeps what it loaded.
    pub fn open_best_effort(files: DataFiles) -> Self {
        let shows = load_shows(&files.shows).unwrap_or_else(|err| {
            log::error!("could not load shows, starting with none: {err:#}");
            Vec::new()
        });
        let channels = load_channels(&files.channels).unwrap_or_else(|err| {
            log::error!("could not load channels, starting with none: {err:#}");
            Vec::new()
        });
        Self::from_parts(files, shows, channels)
    }

    /// Every show, in insertion order.
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Every channel, in insertion order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Locations of the backing files.
    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    /// Look a show up by its display name.
    pub fn find_show(&self, name: &str) -> Option<&Show> {
        let encoded = encode_text(name);
        self.shows.iter().find(|show| show.name == encoded)
    }

    /// Look a channel up by its display name.
    pub fn find_channel(&self, name: &str) -> Option<&Channel> {
        let encoded = encode_text(name);
        self.channels.iter().find(|channel| channel.name == encoded)
    }

    /// Like [`find_show`](Self::find_show) but reports an empty name or a
    /// missing show as an error, the way edits do.
    pub fn locate_show(&self, name: &str) -> Result<&Show, StoreError> {
        require_name(name, "Please provide valid show details.")?;
        self.find_show(name)
            .ok_or_else(|| StoreError::not_found(RecordKind::Show, name))
    }

    /// Channel counterpart of [`locate_show`](Self::locate_show).
    pub fn locate_channel(&self, name: &str) -> Result<&Channel, StoreError> {
        require_name(name, "Please provide valid channel details.")?;
        self.find_channel(name)
            .ok_or_else(|| StoreError::not_found(RecordKind::Channel, name))
    }

    fn channel_code_exists(&self, code: &str) -> bool {
        self.channels.iter().any(|channel| channel.code == code)
    }
}

fn require_name(name: &str, message: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(message.to_string()));
    }
    Ok(())
}

/// Treat blank optional text as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
