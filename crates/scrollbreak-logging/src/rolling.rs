//! crates/scrollbreak-logging/src/rolling.rs
//! Append-only log file with optional size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use scrollbreak_core::Record;
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::config::FileConfig;

/// Timestamp format of a log file line, `1970-01-01 00:00:00,000`.
const LINE_TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]");

/// A log file that appends rendered records and rotates by size.
///
/// Writers share one `RollingFile` behind a reference; every append holds an
/// internal mutex, so lines from concurrent callers never interleave. With
/// rotation enabled, an append that would push the file past the configured
/// threshold first renames the file to `<path>.1` (shifting older backups to
/// `<path>.2` and so on, dropping the oldest) and starts a fresh file.
#[derive(Debug)]
pub struct RollingFile {
    path: PathBuf,
    max_bytes: Option<u64>,
    backups: u32,
    state: Mutex<RollingState>,
}

#[derive(Debug)]
struct RollingState {
    file: File,
    written: u64,
}

impl RollingFile {
    /// Opens (or creates) the log file described by `config`.
    ///
    /// An existing file is appended to, and its current size counts toward
    /// the rotation threshold.
    pub fn open(config: &FileConfig) -> io::Result<Self> {
        let file = open_append(config.path())?;
        let written = file.metadata()?.len();
        Ok(Self {
            path: config.path().to_path_buf(),
            max_bytes: config.max_bytes(),
            backups: config.backups(),
            state: Mutex::new(RollingState { file, written }),
        })
    }

    /// Renders `record` as `timestamp LEVEL message` and appends it as one
    /// line, rotating first if the line would push the file past the
    /// threshold.
    pub fn append_record(&self, record: &Record) -> io::Result<()> {
        let line = render_line(record)?;
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.rotation_due(&state, line.len() as u64) {
            self.rotate(&mut state)?;
        }
        state.file.write_all(line.as_bytes())?;
        state.file.flush()?;
        state.written += line.len() as u64;
        Ok(())
    }

    /// The path records are appended to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rotation_due(&self, state: &RollingState, incoming: u64) -> bool {
        self.max_bytes
            .is_some_and(|max| state.written > 0 && state.written + incoming > max)
    }

    fn rotate(&self, state: &mut RollingState) -> io::Result<()> {
        state.file.flush()?;
        if self.backups == 0 {
            // No backups kept: restart the file in place.
            state.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            state.written = 0;
            return Ok(());
        }
        for n in (1..self.backups).rev() {
            shift_backup(&self.backup_path(n), &self.backup_path(n + 1))?;
        }
        fs::rename(&self.path, self.backup_path(1))?;
        // The old handle closes when the fresh one replaces it.
        state.file = open_append(&self.path)?;
        state.written = 0;
        Ok(())
    }

    fn backup_path(&self, n: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Moves one backup slot up, treating a missing source as an empty slot.
fn shift_backup(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error),
    }
}

fn render_line(record: &Record) -> io::Result<String> {
    let timestamp = OffsetDateTime::from(record.timestamp())
        .format(LINE_TIMESTAMP_FORMAT)
        .map_err(io::Error::other)?;
    Ok(format!(
        "{timestamp} {} {}\n",
        record.severity().as_str(),
        record.message()
    ))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;
    use scrollbreak_core::Severity;

    #[test]
    fn line_rendering_is_deterministic() {
        let record = Record::with_timestamp(Severity::Info, "hello", SystemTime::UNIX_EPOCH);
        let line = render_line(&record).expect("render line");
        assert_eq!(line, "1970-01-01 00:00:00,000 INFO hello\n");
    }

    #[test]
    fn line_rendering_keeps_subsecond_precision() {
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_millis(1_500);
        let record = Record::with_timestamp(Severity::Warning, "late", stamp);
        let line = render_line(&record).expect("render line");
        assert_eq!(line, "1970-01-01 00:00:01,500 WARNING late\n");
    }

    #[test]
    fn backup_paths_append_a_numeric_suffix() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = FileConfig::new(dir.path().join("app.log")).with_rotation(64, 2);
        let file = RollingFile::open(&config).expect("open rolling file");
        assert_eq!(file.backup_path(1), dir.path().join("app.log.1"));
        assert_eq!(file.backup_path(2), dir.path().join("app.log.2"));
    }
}
