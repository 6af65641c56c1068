use std::path::Path;

use anyhow::Result;

use crate::models::SummaryEntry;

use super::rewrite_lines;

/// Write the broadcast summary, one `channelName showCount` line per entry.
/// Any previous summary is replaced.
pub fn write_summary(path: &Path, entries: &[SummaryEntry]) -> Result<()> {
    rewrite_lines(
        path,
        entries
            .iter()
            .map(|entry| format!("{} {}", entry.channel_name, entry.show_count)),
    )
}
