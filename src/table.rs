//! Fixed-width text tables for the listing screens.
//!
//! Every column is as wide as its header or its longest cell, whichever is
//! larger, with one space of padding on both sides:
//!
//! ```text
//! -----------------------
//! | Code | Name | ...  |
//! -----------------------
//! | 1    | Arte | ...  |
//! -----------------------
//! 1 channels found.
//! ```

use std::fmt;

use crate::models::{Channel, Show};

/// A rendered-on-demand table. Widths are fixed when the table is built;
/// [`lines`](Table::lines) can be called any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
    noun: &'static str,
}

impl Table {
    /// Build a table from header names and rows of cells. `noun` names the
    /// records in the footer line.
    pub fn new(headers: Vec<&'static str>, rows: Vec<Vec<String>>, noun: &'static str) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        Self {
            headers,
            rows,
            widths,
            noun,
        }
    }

    /// Full show listing, one row per show in the given order.
    pub fn shows<'a>(shows: impl IntoIterator<Item = &'a Show>) -> Self {
        Self::show_table(shows, true)
    }

    /// Show listing without the day column, for a single day's schedule.
    pub fn shows_without_day<'a>(shows: impl IntoIterator<Item = &'a Show>) -> Self {
        Self::show_table(shows, false)
    }

    fn show_table<'a>(shows: impl IntoIterator<Item = &'a Show>, with_day: bool) -> Self {
        let mut headers = vec!["Name", "Category", "Start Time", "Duration"];
        if with_day {
            headers.push("Day");
        }
        headers.push("Channel Code");

        let rows = shows
            .into_iter()
            .map(|show| {
                let mut row = vec![
                    show.display_name(),
                    show.display_category(),
                    show.start.to_string(),
                    show.display_duration(),
                ];
                if with_day {
                    row.push(show.display_day());
                }
                row.push(show.channel_code.clone());
                row
            })
            .collect();

        Self::new(headers, rows, "shows")
    }

    /// Channel listing, one row per channel in the given order.
    pub fn channels<'a>(channels: impl IntoIterator<Item = &'a Channel>) -> Self {
        let rows = channels
            .into_iter()
            .map(|channel| {
                vec![
                    channel.code.clone(),
                    channel.display_name(),
                    channel.display_country(),
                ]
            })
            .collect();
        Self::new(vec!["Code", "Name", "Country of Origin"], rows, "channels")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths without padding.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Lazily render the table: rule, header, rule, rows, rule, footer.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        std::iter::once(self.rule())
            .chain(std::iter::once(self.render_row(&header)))
            .chain(std::iter::once(self.rule()))
            .chain(self.rows.iter().map(|row| self.render_row(row)))
            .chain(std::iter::once(self.rule()))
            .chain(std::iter::once(format!("{} {} found.", self.rows.len(), self.noun)))
    }

    fn rule(&self) -> String {
        let total: usize = self.widths.iter().map(|w| w + 2).sum::<usize>() + self.widths.len() + 1;
        "-".repeat(total)
    }

    fn render_row(&self, cells: &[String]) -> String {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&self.widths) {
            line.push(' ');
            line.push_str(cell);
            let padding = width.saturating_sub(cell.chars().count()) + 1;
            line.push_str(&" ".repeat(padding));
            line.push('|');
        }
        line
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::StartTime;

    fn channel(code: &str, name: &str, country: &str) -> Channel {
        Channel {
            code: code.into(),
            name: name.into(),
            origin_country: country.into(),
        }
    }

    #[test]
    fn channel_table_uses_decoded_widths() {
        let channels = vec![
            channel("1", "Arte", "France"),
            channel("12", "Sky_Arts_Channel", "UK"),
        ];

        let rendered: Vec<String> = Table::channels(&channels).lines().collect();

        assert_eq!(
            rendered,
            vec![
                "-----------------------------------------------",
                "| Code | Name             | Country of Origin |",
                "-----------------------------------------------",
                "| 1    | Arte             | France            |",
                "| 12   | Sky Arts Channel | UK                |",
                "-----------------------------------------------",
                "2 channels found.",
            ]
        );
    }

    #[test]
    fn rule_matches_row_width() {
        let show = Show {
            name: "A".into(),
            category: "News".into(),
            start: StartTime::new(6, 0).unwrap(),
            duration: 120,
            day_of_week: "Sunday".into(),
            channel_code: "1".into(),
        };
        let table = Table::shows([&show]);
        let lines: Vec<String> = table.lines().collect();

        for line in &lines[..lines.len() - 1] {
            assert_eq!(line.chars().count(), lines[0].len());
        }
        assert_eq!(lines[3], "| A    | News     | 06:00      | 120 min  | Sunday | 1            |");
    }

    #[test]
    fn day_column_can_be_dropped() {
        let table = Table::shows_without_day(std::iter::empty());
        assert_eq!(table.widths().len(), 5);
        assert!(table.is_empty());
        assert_eq!(table.lines().last().unwrap(), "0 shows found.");
    }

    #[test]
    fn rendering_is_repeatable() {
        let channels = vec![channel("1", "Arte", "France")];
        let table = Table::channels(&channels);
        assert_eq!(table.to_string(), table.to_string());
    }
}
