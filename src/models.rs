//! Domain records held by the store and written to the flat files. Text fields
//! are kept in their encoded form (spaces swapped for underscores) so a record
//! can always be written back as one whitespace-delimited row; the `display_*`
//! helpers decode them for anything a person reads.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Character that stands in for a space inside stored free-text fields.
pub const SPACE_ESCAPE: char = '_';

/// Replace every whitespace character with [`SPACE_ESCAPE`] so the value
/// survives the whitespace-separated file format.
///
/// The scheme is lossy: an underscore typed by the user, or a tab, decodes to
/// a plain space.
pub fn encode_text(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_whitespace() { SPACE_ESCAPE } else { ch })
        .collect()
}

/// Inverse of [`encode_text`].
pub fn decode_text(text: &str) -> String {
    text.replace(SPACE_ESCAPE, " ")
}

/// Wall-clock start of a show. Ordering is by hour, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StartTime {
    pub hour: u8,
    pub minute: u8,
}

impl StartTime {
    /// Build a start time, rejecting hours outside 0-23 and minutes outside 0-59.
    pub fn new(hour: u8, minute: u8) -> Result<Self, StoreError> {
        if hour > 23 || minute > 59 {
            return Err(StoreError::Format(
                "Invalid time. Hours must be 0-23, minutes must be 0-59.".to_string(),
            ));
        }
        Ok(Self { hour, minute })
    }
}

impl FromStr for StartTime {
    type Err = StoreError;

    /// Parse `HH:MM`. Single-digit parts (`7:5`) are accepted.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = text
            .trim()
            .split_once(':')
            .ok_or_else(|| StoreError::Format("Invalid time format. Use HH:MM format.".into()))?;

        let parse_part = |part: &str| {
            part.trim().parse::<u8>().map_err(|err| {
                StoreError::Format(format!("Invalid time format '{}': {err}", text.trim()))
            })
        };

        Self::new(parse_part(hour)?, parse_part(minute)?)
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A scheduled broadcast. `name` is unique across the store and
/// `channel_code` pointed at an existing channel when it was last set.
pub struct Show {
    /// Encoded show name.
    pub name: String,
    /// Encoded category, matched exactly by the average-duration query.
    pub category: String,
    pub start: StartTime,
    /// Length in minutes, always positive.
    pub duration: u32,
    /// Encoded day of week. Free text; compared case-insensitively.
    pub day_of_week: String,
    pub channel_code: String,
}

impl Show {
    /// Name as the user typed it, with underscores turned back into spaces.
    /// Lookups by name compare against the encoded form instead.
    pub fn display_name(&self) -> String {
        decode_text(&self.name)
    }

    /// Decoded category.
    pub fn display_category(&self) -> String {
        decode_text(&self.category)
    }

    /// Decoded day of week, shown in the full listing's `Day` column.
    pub fn display_day(&self) -> String {
        decode_text(&self.day_of_week)
    }

    /// Duration as shown in tables, e.g. `45 min`.
    pub fn display_duration(&self) -> String {
        format!("{} min", self.duration)
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A broadcaster. Both `code` and `name` are unique across channels; codes
/// are handed out by the store as increasing integers rendered as text.
pub struct Channel {
    pub code: String,
    /// Encoded channel name.
    pub name: String,
    /// Encoded origin country.
    pub origin_country: String,
}

impl Channel {
    /// Decoded channel name, as printed in listings and edit prompts.
    pub fn display_name(&self) -> String {
        decode_text(&self.name)
    }

    /// Decoded origin country.
    pub fn display_country(&self) -> String {
        decode_text(&self.origin_country)
    }

    /// Numeric value of the code, or zero when the code is not an integer.
    pub fn numeric_code(&self) -> i64 {
        self.code.trim().parse::<i64>().unwrap_or(0)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the broadcast summary: a channel and how many shows resolve to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Encoded channel name, as written to the summary file.
    pub channel_name: String,
    pub show_count: usize,
}
