//! Interactive collection of new records and edit patches. Everything the
//! user types is resolved here into plain values; the store never prompts.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::models::StartTime;
use crate::store::{ChannelPatch, ShowDraft, ShowPatch};

use super::terminal::Console;

/// Answers to the "add show" questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShowForm {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) start_time: String,
    pub(crate) duration: i64,
    pub(crate) day_of_week: String,
    pub(crate) channel_code: String,
}

impl ShowForm {
    pub(crate) fn draft(&self) -> ShowDraft<'_> {
        ShowDraft {
            name: &self.name,
            category: &self.category,
            start_time: &self.start_time,
            duration: self.duration,
            day_of_week: &self.day_of_week,
            channel_code: &self.channel_code,
        }
    }
}

/// Ask for every field of a new show. Returns `None`, after telling the
/// user, when the duration is not a whole number.
pub(crate) fn read_show_form<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<ShowForm>> {
    let name = console.prompt("Enter show name: ")?;
    let category = console.prompt("Enter category: ")?;
    let start_time = console.prompt("Enter start time (HH:MM): ")?;
    let duration_raw = console.prompt("Enter duration (minutes): ")?;
    let Ok(duration) = duration_raw.trim().parse::<i64>() else {
        console.error("Invalid duration. Operation cancelled.")?;
        return Ok(None);
    };
    let day_of_week = console.prompt("Enter day of week: ")?;
    let channel_code = console.prompt("Enter channel code: ")?;

    Ok(Some(ShowForm {
        name: name.trim().to_string(),
        category: category.trim().to_string(),
        start_time: start_time.trim().to_string(),
        duration,
        day_of_week: day_of_week.trim().to_string(),
        channel_code: channel_code.trim().to_string(),
    }))
}

/// Ask for a replacement value per show field; blank answers keep the
/// current value. An unusable time or duration is reported and treated as
/// blank.
pub(crate) fn read_show_patch<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<ShowPatch> {
    let name = optional(console.prompt("Name: ")?);
    let category = optional(console.prompt("Category: ")?);

    let start = match optional(console.prompt("Start Time (HH:MM): ")?) {
        Some(text) => match text.parse::<StartTime>() {
            Ok(start) => Some(start),
            Err(err) => {
                console.error(&format!("{err} Using original time."))?;
                None
            }
        },
        None => None,
    };

    let duration = match optional(console.prompt("Duration: ")?) {
        Some(text) => match text.parse::<u32>() {
            Ok(minutes) if minutes > 0 => Some(minutes),
            _ => {
                console.error("Invalid duration. Please provide a positive value.")?;
                None
            }
        },
        None => None,
    };

    let day_of_week = optional(console.prompt("Day of Week: ")?);
    let channel_code = optional(console.prompt("Channel Code: ")?);

    Ok(ShowPatch {
        name,
        category,
        start,
        duration,
        day_of_week,
        channel_code,
    })
}

/// Ask for a replacement code, name and origin country.
pub(crate) fn read_channel_patch<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<ChannelPatch> {
    Ok(ChannelPatch {
        code: optional(console.prompt("Code: ")?),
        name: optional(console.prompt("Name: ")?),
        origin_country: optional(console.prompt("Origin Country: ")?),
    })
}

fn optional(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    fn console(input: &str) -> Console<Cursor<String>, Vec<u8>> {
        Console::new(Cursor::new(input.to_string()), Vec::new(), false)
    }

    #[test]
    fn blank_answers_leave_fields_unset() {
        let mut console = console("\n\n\n\nFriday\n\n");
        let patch = read_show_patch(&mut console).unwrap();
        assert_eq!(
            patch,
            ShowPatch {
                day_of_week: Some("Friday".into()),
                ..ShowPatch::default()
            }
        );
    }

    #[test]
    fn bad_time_and_duration_keep_current_values() {
        let mut console = console("New Name\n\n25:99\n-5\n\n3\n");
        let patch = read_show_patch(&mut console).unwrap();

        assert_eq!(patch.name.as_deref(), Some("New Name"));
        assert_eq!(patch.start, None);
        assert_eq!(patch.duration, None);
        assert_eq!(patch.channel_code.as_deref(), Some("3"));

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Using original time."));
        assert!(output.contains("Invalid duration. Please provide a positive value."));
    }

    #[test]
    fn show_form_cancels_on_non_numeric_duration() {
        let mut console = console("Quiz\nGames\n19:00\nlong\n");
        assert_eq!(read_show_form(&mut console).unwrap(), None);
    }

    #[test]
    fn show_form_collects_trimmed_answers() {
        let mut console = console(" Quiz Night \nGames\n19:00\n 45\nFriday\n2\n");
        let form = read_show_form(&mut console).unwrap().unwrap();
        assert_eq!(form.name, "Quiz Night");
        assert_eq!(form.duration, 45);
        assert_eq!(form.draft().channel_code, "2");
    }

    #[test]
    fn channel_patch_reads_three_fields() {
        let mut console = console("9\n\nJapan\n");
        assert_eq!(
            read_channel_patch(&mut console).unwrap(),
            ChannelPatch {
                code: Some("9".into()),
                name: None,
                origin_country: Some("Japan".into()),
            }
        );
    }
}
