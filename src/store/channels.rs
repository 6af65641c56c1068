use crate::db::rewrite_channels;
use crate::error::{RecordKind, StoreError};
use crate::models::{encode_text, Channel};

use super::{non_blank, require_name, RecordStore};

/// Replacement values for an existing channel; blank or `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub origin_country: Option<String>,
}

impl ChannelPatch {
    pub fn is_empty(&self) -> bool {
        non_blank(self.code.as_deref()).is_none()
            && non_blank(self.name.as_deref()).is_none()
            && non_blank(self.origin_country.as_deref()).is_none()
    }
}

impl RecordStore {
    /// Code the next added channel will get: one past the largest numeric
    /// code in use. Codes that are not integers count as zero. Fails once the
    /// largest code is `i64::MAX`, since no larger code exists.
    pub fn next_channel_code(&self) -> Result<String, StoreError> {
        let max = self
            .channels
            .iter()
            .map(Channel::numeric_code)
            .fold(0, i64::max);
        max.checked_add(1)
            .map(|code| code.to_string())
            .ok_or_else(|| {
                StoreError::Validation(format!(
                    "No channel code is left after {max}. Renumber a channel first."
                ))
            })
    }

    /// Add a channel under a freshly assigned code and return that code.
    pub fn add_channel(&mut self, name: &str, origin_country: &str) -> Result<String, StoreError> {
        if name.trim().is_empty() || origin_country.trim().is_empty() {
            return Err(StoreError::Validation(
                "Please provide valid channel details.".to_string(),
            ));
        }

        let encoded = encode_text(name);
        if self.channels.iter().any(|channel| channel.name == encoded) {
            return Err(StoreError::duplicate(RecordKind::Channel, "name", name));
        }

        let code = self.next_channel_code()?;
        let mut updated = self.channels.clone();
        updated.push(Channel {
            code: code.clone(),
            name: encoded,
            origin_country: encode_text(origin_country),
        });

        self.replace_channels(updated)?;
        log::info!("added channel {code}");
        Ok(code)
    }

    /// Remove every channel called `name`. Shows that reference it keep
    /// their code. The channel file is rewritten even when nothing matched.
    pub fn delete_channel(&mut self, name: &str) -> Result<usize, StoreError> {
        require_name(name, "Please provide valid channel details.")?;

        let encoded = encode_text(name);
        let kept: Vec<Channel> = self
            .channels
            .iter()
            .filter(|channel| channel.name != encoded)
            .cloned()
            .collect();
        let removed = self.channels.len() - kept.len();

        self.replace_channels(kept)?;

        if removed == 0 {
            return Err(StoreError::not_found(RecordKind::Channel, name));
        }
        log::info!("deleted {removed} channel(s) named {encoded}");
        Ok(removed)
    }

    /// Apply `patch` to the channel called `name`. Code and name must stay
    /// unique and a code may not contain whitespace; a rejected value stops
    /// the edit without writing the file, keeping whatever was applied
    /// before it.
    pub fn edit_channel(&mut self, name: &str, patch: ChannelPatch) -> Result<(), StoreError> {
        require_name(name, "Please provide valid channel details.")?;
        let encoded = encode_text(name);
        let index = self
            .channels
            .iter()
            .position(|channel| channel.name == encoded)
            .ok_or_else(|| StoreError::not_found(RecordKind::Channel, name))?;

        let mut edited = self.channels[index].clone();

        if let Some(code) = non_blank(patch.code.as_deref()) {
            let code = code.trim();
            if code.contains(char::is_whitespace) {
                return Err(StoreError::Validation(format!(
                    "Channel code '{code}' must not contain spaces."
                )));
            }
            let taken = self
                .channels
                .iter()
                .enumerate()
                .any(|(idx, channel)| idx != index && channel.code == code);
            if taken {
                return Err(StoreError::duplicate(RecordKind::Channel, "code", code));
            }
            edited.code = code.to_string();
        }

        if let Some(new_name) = non_blank(patch.name.as_deref()) {
            let new_name = encode_text(new_name);
            let taken = self
                .channels
                .iter()
                .enumerate()
                .any(|(idx, channel)| idx != index && channel.name == new_name);
            if taken {
                self.channels[index] = edited;
                return Err(StoreError::duplicate(RecordKind::Channel, "name", &new_name));
            }
            edited.name = new_name;
        }

        if let Some(country) = non_blank(patch.origin_country.as_deref()) {
            edited.origin_country = encode_text(country);
        }

        let mut updated = self.channels.clone();
        updated[index] = edited;
        self.replace_channels(updated)?;
        log::info!("updated channel {}", self.channels[index].code);
        Ok(())
    }

    /// Write `channels` to the channel file, then adopt them. Memory only
    /// changes when the write succeeded.
    fn replace_channels(&mut self, channels: Vec<Channel>) -> Result<(), StoreError> {
        rewrite_channels(&self.files.channels, &channels).map_err(StoreError::Persistence)?;
        self.channels = channels;
        Ok(())
    }
}
