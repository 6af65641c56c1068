use std::path::Path;

use anyhow::Result;

use crate::error::StoreError;
use crate::models::{Show, StartTime};

use super::{append_line, load_records, rewrite_lines, split_fields};

/// Number of fields in a show row: `name category HH:MM duration day code`.
const SHOW_FIELDS: usize = 6;

/// Render a show as one file row. Text fields are written as stored, so they
/// never contain a raw space.
pub fn format_show_line(show: &Show) -> String {
    format!(
        "{} {} {} {} {} {}",
        show.name, show.category, show.start, show.duration, show.day_of_week, show.channel_code
    )
}

/// Parse one file row back into a show. `line_no` is only used for error
/// reporting.
pub fn parse_show_line(line: &str, line_no: usize) -> Result<Show, StoreError> {
    let fields = split_fields(line, line_no, SHOW_FIELDS)?;

    let start: StartTime = fields[2].parse().map_err(|err: StoreError| StoreError::Parse {
        line: line_no,
        reason: err.to_string(),
    })?;
    let duration = fields[3]
        .parse::<u32>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or_else(|| StoreError::Parse {
            line: line_no,
            reason: format!("invalid duration '{}'", fields[3]),
        })?;

    Ok(Show {
        name: fields[0].to_string(),
        category: fields[1].to_string(),
        start,
        duration,
        day_of_week: fields[4].to_string(),
        channel_code: fields[5].to_string(),
    })
}

/// Load every well-formed show row from `path`.
pub fn load_shows(path: &Path) -> Result<Vec<Show>> {
    load_records(path, parse_show_line)
}

/// Add a single show to the end of the file.
pub fn append_show(path: &Path, show: &Show) -> Result<()> {
    append_line(path, &format_show_line(show))
}

/// Replace the file content with `shows`, in order.
pub fn rewrite_shows(path: &Path, shows: &[Show]) -> Result<()> {
    rewrite_lines(path, shows.iter().map(format_show_line))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn sample() -> Show {
        Show {
            name: "Morning_News".into(),
            category: "News".into(),
            start: StartTime::new(7, 5).unwrap(),
            duration: 30,
            day_of_week: "Monday".into(),
            channel_code: "1".into(),
        }
    }

    #[test]
    fn formats_with_padded_time() {
        assert_eq!(format_show_line(&sample()), "Morning_News News 07:05 30 Monday 1");
    }

    #[test]
    fn parses_a_formatted_row() {
        assert_eq!(parse_show_line("Morning_News News 07:05 30 Monday 1", 1).unwrap(), sample());
    }

    #[test]
    fn rejects_malformed_rows() {
        for row in [
            "Morning_News News 07:05 30 Monday",
            "Morning_News News 07:05 thirty Monday 1",
            "Morning_News News 07:05 0 Monday 1",
            "Morning_News News 25:00 30 Monday 1",
            "Morning_News News 0705 30 Monday 1 extra",
        ] {
            let err = parse_show_line(row, 3).unwrap_err();
            assert!(matches!(err, StoreError::Parse { line: 3, .. }), "{row}: {err:?}");
        }
    }

    #[test]
    fn load_skips_bad_lines_and_keeps_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Program.txt");
        fs::write(
            &path,
            "A News 07:00 30 Monday 1\n\nbroken line\nB Sports 20:15 90 Friday 2\n",
        )
        .unwrap();

        let shows = load_shows(&path).unwrap();
        let names: Vec<_> = shows.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn rewrite_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Program.txt");
        let mut second = sample();
        second.name = "Late_Film".into();
        second.start = StartTime::new(22, 0).unwrap();

        rewrite_shows(&path, &[second.clone(), sample()]).unwrap();

        assert_eq!(load_shows(&path).unwrap(), vec![second, sample()]);
    }
}
