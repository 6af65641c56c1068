use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File holding one show per line.
pub const SHOW_FILE_NAME: &str = "Program.txt";
/// File holding one channel per line.
pub const CHANNEL_FILE_NAME: &str = "Channel.txt";
/// Write-only report produced by the broadcast summary.
pub const SUMMARY_FILE_NAME: &str = "BroadcastSummary.txt";

/// Locations of the three data files. These are the only configurable
/// piece of the program; nothing is read from flags or the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub shows: PathBuf,
    pub channels: PathBuf,
    pub summary: PathBuf,
}

impl DataFiles {
    /// Keep every data file directly inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            shows: dir.join(SHOW_FILE_NAME),
            channels: dir.join(CHANNEL_FILE_NAME),
            summary: dir.join(SUMMARY_FILE_NAME),
        }
    }

    /// Pick the data directory relative to `base`: `base` itself when it
    /// already holds a show file, its parent when the parent does (running
    /// from a build directory), and `base` otherwise.
    pub fn discover(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        if base.join(SHOW_FILE_NAME).is_file() {
            return Self::in_dir(base);
        }
        match base.parent() {
            Some(parent) if parent.join(SHOW_FILE_NAME).is_file() => {
                log::info!("using data files from {}", parent.display());
                Self::in_dir(parent)
            }
            _ => Self::in_dir(base),
        }
    }

    /// Make sure both table files exist. Returns the paths that had to be
    /// created.
    pub fn ensure_tables(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for path in [&self.shows, &self.channels] {
            if ensure_exists(path)? {
                created.push(path.clone());
            }
        }
        Ok(created)
    }
}

/// Create an empty file at `path` unless something is already there. Never
/// truncates an existing file. Returns `true` when the file was created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            log::info!("created {}", path.display());
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(err).with_context(|| format!("failed to create {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_exists_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SHOW_FILE_NAME);

        assert!(ensure_exists(&path).unwrap());
        fs::write(&path, "kept\n").unwrap();
        assert!(!ensure_exists(&path).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn discover_prefers_base_then_parent() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("build");
        fs::create_dir(&nested).unwrap();

        assert_eq!(DataFiles::discover(&nested), DataFiles::in_dir(&nested));

        fs::write(root.path().join(SHOW_FILE_NAME), "").unwrap();
        assert_eq!(DataFiles::discover(&nested), DataFiles::in_dir(root.path()));

        fs::write(nested.join(SHOW_FILE_NAME), "").unwrap();
        assert_eq!(DataFiles::discover(&nested), DataFiles::in_dir(&nested));
    }

    #[test]
    fn ensure_tables_reports_created_files() {
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(dir.path());

        let created = files.ensure_tables().unwrap();
        assert_eq!(created, vec![files.shows.clone(), files.channels.clone()]);
        assert!(files.ensure_tables().unwrap().is_empty());
        assert!(!files.summary.exists());
    }
}
