use std::path::Path;

use anyhow::Result;

use crate::error::StoreError;
use crate::models::Channel;

use super::{load_records, rewrite_lines, split_fields};

/// Number of fields in a channel row: `code name originCountry`.
const CHANNEL_FIELDS: usize = 3;

/// Render a channel as one `code name country` row. Name and country are
/// already encoded, and the store never accepts a code with whitespace.
pub fn format_channel_line(channel: &Channel) -> String {
    format!("{} {} {}", channel.code, channel.name, channel.origin_country)
}

/// Parse one channel row. Anything other than exactly three fields is a
/// [`StoreError::Parse`] tagged with `line_no`.
pub fn parse_channel_line(line: &str, line_no: usize) -> Result<Channel, StoreError> {
    let fields = split_fields(line, line_no, CHANNEL_FIELDS)?;
    Ok(Channel {
        code: fields[0].to_string(),
        name: fields[1].to_string(),
        origin_country: fields[2].to_string(),
    })
}

/// Load every well-formed channel row from `path`.
pub fn load_channels(path: &Path) -> Result<Vec<Channel>> {
    load_records(path, parse_channel_line)
}

/// Replace the file content with `channels`, in order.
pub fn rewrite_channels(path: &Path, channels: &[Channel]) -> Result<()> {
    rewrite_lines(path, channels.iter().map(format_channel_line))
}
