//! Append-only timestamped report store.
//!
//! One flat UTF-8 text file, one logical entry per line, format
//! `[YYYY-MM-DD HH:MM:SS] <summary>`. Entries are only ever appended; read
//! order equals write order. Single-process access assumed, no locking.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Wall-clock timestamp format used by the report and usage log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the current local time formatted for persistence.
pub fn now_stamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// File-backed report store, path injected at construction.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    /// Creates a store over the given path. The file itself is only created
    /// on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one timestamped entry and flushes before returning.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be opened or written.
    pub fn append(&self, summary: &str) -> io::Result<()> {
        self.append_stamped(&now_stamp(), summary)
    }

    /// Appends an entry with an explicit timestamp string.
    ///
    /// Split out from [`ReportStore::append`] so tests can write
    /// deterministic stamps.
    pub fn append_stamped(&self, stamp: &str, summary: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{stamp}] {summary}")?;
        file.flush()
    }

    /// Reads the whole store verbatim.
    ///
    /// Returns `None` when the file does not exist; a missing store is an
    /// absent-data condition, not an error, and nothing is created.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` only if an existing file cannot be read.
    pub fn read(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some)
    }
}
