use crate::db::{append_show, rewrite_shows};
use crate::error::{RecordKind, StoreError};
use crate::models::{encode_text, Show, StartTime};

use super::{non_blank, require_name, RecordStore};

/// A new show exactly as the user typed it. Text is decoded (plain spaces)
/// and the start time is still unparsed `HH:MM`.
#[derive(Debug, Clone, Copy)]
pub struct ShowDraft<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub start_time: &'a str,
    pub duration: i64,
    pub day_of_week: &'a str,
    pub channel_code: &'a str,
}

/// Field-by-field replacement values for an existing show. `None`, blank
/// text and a zero duration all mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub start: Option<StartTime>,
    pub duration: Option<u32>,
    pub day_of_week: Option<String>,
    pub channel_code: Option<String>,
}

impl ShowPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        non_blank(self.name.as_deref()).is_none()
            && non_blank(self.category.as_deref()).is_none()
            && self.start.is_none()
            && self.duration.filter(|minutes| *minutes > 0).is_none()
            && non_blank(self.day_of_week.as_deref()).is_none()
            && non_blank(self.channel_code.as_deref()).is_none()
    }
}

impl RecordStore {
    /// Validate `draft`, append it to the show file, then to memory.
    pub fn add_show(&mut self, draft: ShowDraft<'_>) -> Result<(), StoreError> {
        let text_fields = [
            draft.name,
            draft.category,
            draft.start_time,
            draft.day_of_week,
            draft.channel_code,
        ];
        if text_fields.iter().any(|field| field.trim().is_empty()) || draft.duration <= 0 {
            return Err(StoreError::Validation(
                "Please provide valid show details.".to_string(),
            ));
        }

        let name = encode_text(draft.name);
        if self.shows.iter().any(|show| show.name == name) {
            return Err(StoreError::duplicate(RecordKind::Show, "name", draft.name));
        }

        if !self.channel_code_exists(draft.channel_code) {
            return Err(StoreError::Reference(draft.channel_code.to_string()));
        }

        let start: StartTime = draft.start_time.parse()?;
        let duration = u32::try_from(draft.duration)
            .map_err(|_| StoreError::Format(format!("Invalid duration '{}'.", draft.duration)))?;

        let show = Show {
            name,
            category: encode_text(draft.category),
            start,
            duration,
            day_of_week: encode_text(draft.day_of_week),
            channel_code: draft.channel_code.to_string(),
        };

        append_show(&self.files.shows, &show).map_err(StoreError::Persistence)?;
        log::info!("added show {}", show.name);
        self.shows.push(show);
        Ok(())
    }

    /// Remove every show called `name` and rewrite the show file, even when
    /// nothing matched. Returns how many records were removed.
    pub fn delete_show(&mut self, name: &str) -> Result<usize, StoreError> {
        require_name(name, "Please provide valid show details.")?;

        let encoded = encode_text(name);
        let kept: Vec<Show> = self
            .shows
            .iter()
            .filter(|show| show.name != encoded)
            .cloned()
            .collect();
        let removed = self.shows.len() - kept.len();

        self.replace_shows(kept)?;

        if removed == 0 {
            return Err(StoreError::not_found(RecordKind::Show, name));
        }
        log::info!("deleted {removed} show(s) named {encoded}");
        Ok(removed)
    }

    /// Apply `patch` to the show called `name`, field by field.
    ///
    /// A rejected rename or channel code stops the edit where it is: fields
    /// applied before it stay changed in memory and the file is not written.
    /// A failed write leaves the show as it was.
    pub fn edit_show(&mut self, name: &str, patch: ShowPatch) -> Result<(), StoreError> {
        require_name(name, "Please provide valid show details.")?;
        let encoded = encode_text(name);
        let index = self
            .shows
            .iter()
            .position(|show| show.name == encoded)
            .ok_or_else(|| StoreError::not_found(RecordKind::Show, name))?;

        let mut edited = self.shows[index].clone();

        if let Some(new_name) = non_blank(patch.name.as_deref()) {
            let new_name = encode_text(new_name);
            let taken = self
                .shows
                .iter()
                .enumerate()
                .any(|(idx, show)| idx != index && show.name == new_name);
            if taken {
                return Err(StoreError::duplicate(RecordKind::Show, "name", &new_name));
            }
            edited.name = new_name;
        }

        if let Some(category) = non_blank(patch.category.as_deref()) {
            edited.category = encode_text(category);
        }
        if let Some(start) = patch.start {
            edited.start = start;
        }
        if let Some(duration) = patch.duration.filter(|minutes| *minutes > 0) {
            edited.duration = duration;
        }
        if let Some(day) = non_blank(patch.day_of_week.as_deref()) {
            edited.day_of_week = encode_text(day);
        }

        if let Some(code) = non_blank(patch.channel_code.as_deref()) {
            let code = code.trim();
            if !self.channel_code_exists(code) {
                self.shows[index] = edited;
                return Err(StoreError::Reference(code.to_string()));
            }
            edited.channel_code = code.to_string();
        }

        let mut updated = self.shows.clone();
        updated[index] = edited;
        self.replace_shows(updated)?;
        log::info!("updated show {}", self.shows[index].name);
        Ok(())
    }

    /// Write `shows` to the show file and adopt them only once the write
    /// succeeded, so a failed write leaves memory as it was.
    fn replace_shows(&mut self, shows: Vec<Show>) -> Result<(), StoreError> {
        rewrite_shows(&self.files.shows, &shows).map_err(StoreError::Persistence)?;
        self.shows = shows;
        Ok(())
    }
}
