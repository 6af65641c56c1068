//! Flat-file persistence split across logical submodules. Each table is a
//! text file holding one record per line with single-space separators; the
//! helpers here do the line-level I/O shared by both tables.

mod channels;
mod files;
mod shows;
mod summary;

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::StoreError;

pub use channels::{format_channel_line, load_channels, parse_channel_line, rewrite_channels};
pub use files::{ensure_exists, DataFiles, CHANNEL_FILE_NAME, SHOW_FILE_NAME, SUMMARY_FILE_NAME};
pub use shows::{append_show, format_show_line, load_shows, parse_show_line, rewrite_shows};
pub use summary::write_summary;

/// Read every non-blank line of `path` through `parse`. Lines that fail to
/// parse are logged and skipped so one bad row never hides the rest of the
/// table. A missing file loads as an empty table.
fn load_records<T>(path: &Path, parse: fn(&str, usize) -> Result<T, StoreError>) -> Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("{} does not exist yet, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to open {}", path.display()));
        }
    };

    let mut records = Vec::new();
    for (idx, raw) in BufReader::new(file).split(b'\n').enumerate() {
        let raw = raw.with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = decode_line(&raw, idx + 1).and_then(|line| {
            if line.trim().is_empty() {
                Ok(None)
            } else {
                parse(line, idx + 1).map(Some)
            }
        });
        match parsed {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err) => log::warn!("skipping malformed record in {}: {err}", path.display()),
        }
    }

    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Bytes of one row as text. Rows that are not valid UTF-8 are reported as
/// parse errors so the caller can skip them like any other bad row.
fn decode_line(raw: &[u8], line_no: usize) -> Result<&str, StoreError> {
    std::str::from_utf8(raw).map_err(|err| StoreError::Parse {
        line: line_no,
        reason: format!("not valid UTF-8: {err}"),
    })
}

/// Add one line at the end of `path`, creating the file if needed. A newline
/// is written first when the existing content does not already end in one.
fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open {} for appending", path.display()))?;

    let len = file
        .metadata()
        .with_context(|| format!("failed to inspect {}", path.display()))?
        .len();
    let mut needs_separator = false;
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .with_context(|| format!("failed to read the end of {}", path.display()))?;
        needs_separator = last[0] != b'\n';
    }

    let mut payload = String::with_capacity(line.len() + 2);
    if needs_separator {
        payload.push('\n');
    }
    payload.push_str(line);
    payload.push('\n');

    file.write_all(payload.as_bytes())
        .with_context(|| format!("failed to append to {}", path.display()))
}

/// Truncate `path` and write every line, newline-terminated.
fn rewrite_lines<I>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content).with_context(|| format!("failed to rewrite {}", path.display()))?;
    log::debug!("rewrote {}", path.display());
    Ok(())
}

/// Split a persisted row into exactly `expected` whitespace-separated fields.
fn split_fields(line: &str, line_no: usize, expected: usize) -> Result<Vec<&str>, StoreError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(StoreError::Parse {
            line: line_no,
            reason: format!("expected {expected} fields, found {}", fields.len()),
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_separates_from_unterminated_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.txt");
        fs::write(&path, "first").unwrap();

        append_line(&path, "second").unwrap();
        append_line(&path, "third").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\nthird\n");
    }

    #[test]
    fn append_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.txt");

        append_line(&path, "only").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "only\n");
    }

    #[test]
    fn rewrite_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();

        rewrite_lines(&path, vec!["z".to_string()]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "z\n");
    }

    fn parse_text(line: &str, _line_no: usize) -> Result<String, StoreError> {
        Ok(line.trim_end_matches('\r').to_string())
    }

    #[test]
    fn load_skips_rows_that_are_not_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.txt");
        fs::write(&path, b"1 Arte France\n2 TVE Espa\xf1a\n\n3 NHK Japan").unwrap();

        let rows = load_records(&path, parse_text).unwrap();

        assert_eq!(rows, vec!["1 Arte France", "3 NHK Japan"]);
    }

    #[test]
    fn decode_line_reports_position() {
        let err = decode_line(b"\xff\xfe", 7).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 7, .. }));
        assert_eq!(decode_line(b"plain", 1).unwrap(), "plain");
    }

    #[test]
    fn split_fields_checks_count() {
        assert_eq!(split_fields("a  b c", 1, 3).unwrap(), vec!["a", "b", "c"]);
        let err = split_fields("a b", 4, 3).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 4, .. }));
    }
}
