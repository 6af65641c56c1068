use std::collections::BTreeMap;

use crate::db::write_summary;
use crate::error::StoreError;
use crate::models::{encode_text, Show, SummaryEntry};
use crate::table::Table;

use super::RecordStore;

/// Shows sitting at the longest or shortest duration in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationExtreme<'a> {
    pub minutes: u32,
    /// Every show with exactly `minutes`, in store order.
    pub shows: Vec<&'a Show>,
}

impl RecordStore {
    /// Table of every show in insertion order. Column widths are computed
    /// from the current data on each call.
    pub fn list_shows(&self) -> Table {
        Table::shows(&self.shows)
    }

    /// Table of every channel in insertion order.
    pub fn list_channels(&self) -> Table {
        Table::channels(&self.channels)
    }

    /// Shows whose day matches `day` ignoring case, earliest start first.
    /// Shows starting at the same minute keep their store order.
    pub fn shows_on_day(&self, day: &str) -> Vec<&Show> {
        let wanted = encode_text(day.trim()).to_lowercase();
        let mut matches: Vec<&Show> = self
            .shows
            .iter()
            .filter(|show| show.day_of_week.to_lowercase() == wanted)
            .collect();
        matches.sort_by_key(|show| show.start);
        matches
    }

    /// All shows tied for the longest duration, or `None` when there are no
    /// shows.
    pub fn longest_shows(&self) -> Option<DurationExtreme<'_>> {
        let minutes = self.shows.iter().map(|show| show.duration).max()?;
        Some(self.shows_lasting(minutes))
    }

    /// All shows tied for the shortest duration.
    pub fn shortest_shows(&self) -> Option<DurationExtreme<'_>> {
        let minutes = self.shows.iter().map(|show| show.duration).min()?;
        Some(self.shows_lasting(minutes))
    }

    fn shows_lasting(&self, minutes: u32) -> DurationExtreme<'_> {
        DurationExtreme {
            minutes,
            shows: self
                .shows
                .iter()
                .filter(|show| show.duration == minutes)
                .collect(),
        }
    }

    /// Mean duration of the shows in `category`, or of every show when no
    /// category (or a blank one) is given. `None` when nothing matches.
    pub fn average_duration(&self, category: Option<&str>) -> Option<f64> {
        let filter = category
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(encode_text);

        let (total, count) = self
            .shows
            .iter()
            .filter(|show| filter.as_ref().map_or(true, |wanted| &show.category == wanted))
            .fold((0u64, 0u64), |(total, count), show| {
                (total + u64::from(show.duration), count + 1)
            });

        if count == 0 {
            None
        } else {
            Some(total as f64 / count as f64)
        }
    }

    /// Count shows per channel, ordered by channel name. Each show counts
    /// toward the first channel in store order carrying its code; channels
    /// without shows are left out.
    pub fn summarize_broadcasts(&self) -> Vec<SummaryEntry> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for show in &self.shows {
            if let Some(channel) = self
                .channels
                .iter()
                .find(|channel| channel.code == show.channel_code)
            {
                *counts.entry(channel.name.as_str()).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .map(|(name, show_count)| SummaryEntry {
                channel_name: name.to_string(),
                show_count,
            })
            .collect()
    }

    /// Write the broadcast summary file and return what was written. Returns
    /// `Ok(None)` without touching the file when there are no shows or no
    /// channels.
    pub fn broadcast_summary(&self) -> Result<Option<Vec<SummaryEntry>>, StoreError> {
        if self.shows.is_empty() || self.channels.is_empty() {
            return Ok(None);
        }

        let entries = self.summarize_broadcasts();
        write_summary(&self.files.summary, &entries).map_err(StoreError::Persistence)?;
        log::info!(
            "wrote {} summary lines to {}",
            entries.len(),
            self.files.summary.display()
        );
        Ok(Some(entries))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::test_support::{channel, show, temp_store};

    fn store_with(shows: Vec<Show>) -> (tempfile::TempDir, RecordStore) {
        let (dir, store) = temp_store();
        let store = RecordStore::from_parts(
            store.files().clone(),
            shows,
            vec![channel("1", "Arte"), channel("2", "BBC One")],
        );
        (dir, store)
    }

    fn names(shows: &[&Show]) -> Vec<String> {
        shows.iter().map(|show| show.display_name()).collect()
    }

    #[test]
    fn longest_returns_every_tied_show_in_order() {
        let (_dir, store) = store_with(vec![
            show("a", "News", (1, 0), 30),
            show("b", "News", (2, 0), 90),
            show("c", "News", (3, 0), 90),
            show("d", "News", (4, 0), 45),
        ]);

        let longest = store.longest_shows().unwrap();
        assert_eq!(longest.minutes, 90);
        assert_eq!(names(&longest.shows), vec!["b", "c"]);

        let shortest = store.shortest_shows().unwrap();
        assert_eq!(shortest.minutes, 30);
        assert_eq!(names(&shortest.shows), vec!["a"]);
    }

    #[test]
    fn extremes_of_empty_store_are_none() {
        let (_dir, store) = store_with(Vec::new());
        assert!(store.longest_shows().is_none());
        assert!(store.shortest_shows().is_none());
    }

    #[test]
    fn average_filters_by_category() {
        let (_dir, store) = store_with(vec![
            show("a", "News", (1, 0), 30),
            show("b", "Sports", (2, 0), 60),
            show("c", "News", (3, 0), 50),
        ]);

        assert_eq!(store.average_duration(Some("News")), Some(40.0));
        assert_eq!(store.average_duration(Some("Drama")), None);
        assert_eq!(store.average_duration(None), Some(140.0 / 3.0));
        assert_eq!(store.average_duration(Some("  ")), Some(140.0 / 3.0));
    }

    #[test]
    fn average_matches_multi_word_categories() {
        let (_dir, store) = store_with(vec![show("a", "Late News", (1, 0), 20)]);
        assert_eq!(store.average_duration(Some("Late News")), Some(20.0));
    }

    #[test]
    fn day_query_ignores_case_and_sorts_by_start() {
        let mut nine = show("nine", "News", (9, 0), 30);
        let mut half_seven = show("half seven", "News", (7, 30), 30);
        let mut tuesday = show("tuesday", "News", (6, 0), 30);
        nine.day_of_week = "Monday".into();
        half_seven.day_of_week = "MONDAY".into();
        tuesday.day_of_week = "Tuesday".into();
        let (_dir, store) = store_with(vec![nine, half_seven, tuesday]);

        assert_eq!(names(&store.shows_on_day("monday")), vec!["half seven", "nine"]);
        assert!(store.shows_on_day("Sunday").is_empty());
    }

    #[test]
    fn summary_counts_first_matching_channel_sorted_by_name() {
        let mut on_two = show("b", "News", (2, 0), 30);
        on_two.channel_code = "2".into();
        let mut orphan = show("z", "News", (2, 0), 30);
        orphan.channel_code = "9".into();
        let (_dir, mut store) = store_with(vec![
            on_two,
            show("a", "News", (1, 0), 30),
            show("c", "News", (3, 0), 30),
            orphan,
        ]);
        store.channels.push(channel("1", "Zulu"));

        let entries = store.broadcast_summary().unwrap().unwrap();

        assert_eq!(
            entries,
            vec![
                SummaryEntry {
                    channel_name: "Arte".into(),
                    show_count: 2,
                },
                SummaryEntry {
                    channel_name: "BBC_One".into(),
                    show_count: 1,
                },
            ]
        );
        assert_eq!(
            fs::read_to_string(&store.files().summary).unwrap(),
            "Arte 2\nBBC_One 1\n"
        );
    }

    #[test]
    fn summary_without_shows_writes_nothing() {
        let (_dir, store) = store_with(Vec::new());
        assert_eq!(store.broadcast_summary().unwrap(), None);
        assert!(!store.files().summary.exists());
    }

    #[test]
    fn listing_twice_is_identical() {
        let (_dir, store) = store_with(vec![show("a", "News", (1, 0), 30)]);
        assert_eq!(store.list_shows().to_string(), store.list_shows().to_string());
        assert_eq!(store.list_channels().to_string(), store.list_channels().to_string());
    }
}
