//! CSV usage log backing the history chart.
//!
//! Columnar text file with a mandatory `timestamp,kwh` header written
//! exactly once, on first creation. One `(timestamp, value)` row per logged
//! reading. Rows whose value fails numeric parsing are skipped on read.

use std::io;
use std::path::{Path, PathBuf};

use crate::report::now_stamp;

/// Column header written once when the log file is created.
pub const USAGE_LOG_HEADER: [&str; 2] = ["timestamp", "kwh"];

/// One parsed usage reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Capture timestamp, verbatim from the file.
    pub timestamp: String,
    /// Logged consumption (kWh).
    pub kwh: f64,
}

/// File-backed usage log, path injected at construction.
#[derive(Debug, Clone)]
pub struct UsageLog {
    path: PathBuf,
}

impl UsageLog {
    /// Creates a log over the given path. The file itself is only created
    /// on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one `(timestamp, kwh)` row, writing the header first when the
    /// file does not exist yet. The existence check and the write happen
    /// within this one call.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be opened or written.
    pub fn log(&self, kwh: f64) -> io::Result<()> {
        self.log_stamped(&now_stamp(), kwh)
    }

    /// Appends a row with an explicit timestamp string (deterministic tests).
    pub fn log_stamped(&self, stamp: &str, kwh: f64) -> io::Result<()> {
        let new_file = !self.path.exists();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new().from_writer(file);
        if new_file {
            wtr.write_record(USAGE_LOG_HEADER)?;
        }
        let value = kwh.to_string();
        wtr.write_record([stamp, value.as_str()])?;
        wtr.flush()
    }

    /// Reads every parsable row in file order.
    ///
    /// Returns `None` when the file is absent. Rows whose value field does
    /// not parse as `f64` are silently discarded; they never abort the read
    /// or drop neighboring rows.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if an existing file cannot be read.
    pub fn readings(&self) -> io::Result<Option<Vec<Reading>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(&self.path)?;
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = match record {
                Ok(r) => r,
                Err(_) => continue,
            };
            let (Some(stamp), Some(raw)) = (record.get(0), record.get(1)) else {
                continue;
            };
            let Ok(kwh) = raw.trim().parse::<f64>() else {
                continue;
            };
            rows.push(Reading {
                timestamp: stamp.to_string(),
                kwh,
            });
        }
        Ok(Some(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_log() -> (tempfile::TempDir, UsageLog) {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = UsageLog::new(dir.path().join("energy_log.csv"));
        (dir, log)
    }

    #[test]
    fn readings_of_missing_log_is_none() {
        let (_dir, log) = temp_log();
        assert!(log.readings().expect("read ok").is_none());
        assert!(!log.path().exists());
    }

    #[test]
    fn header_written_exactly_once() {
        let (_dir, log) = temp_log();
        log.log_stamped("2026-01-01 00:00:00", 1.0).expect("first write");
        log.log_stamped("2026-01-01 01:00:00", 2.0).expect("second write");
        log.log_stamped("2026-01-01 02:00:00", 3.0).expect("third write");

        let text = fs::read_to_string(log.path()).expect("file readable");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4, "header + 3 rows");
        assert_eq!(lines[0], "timestamp,kwh");
        assert_eq!(
            lines.iter().filter(|l| **l == "timestamp,kwh").count(),
            1,
            "header must precede all rows and appear once"
        );
    }

    #[test]
    fn rows_come_back_in_write_order() {
        let (_dir, log) = temp_log();
        for i in 0..4 {
            log.log_stamped(&format!("2026-01-01 0{i}:00:00"), i as f64)
                .expect("write ok");
        }
        let rows = log.readings().expect("read ok").expect("file exists");
        assert_eq!(rows.len(), 4);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.kwh, i as f64);
        }
    }

    #[test]
    fn malformed_value_rows_are_skipped_not_fatal() {
        let (_dir, log) = temp_log();
        log.log_stamped("2026-01-01 00:00:00", 5.5).expect("write ok");
        // Corrupt one row by hand, then keep logging.
        let mut text = fs::read_to_string(log.path()).expect("readable");
        text.push_str("2026-01-01 01:00:00,not-a-number\n");
        fs::write(log.path(), text).expect("writable");
        log.log_stamped("2026-01-01 02:00:00", 7.25).expect("write ok");

        let rows = log.readings().expect("read ok").expect("file exists");
        assert_eq!(rows.len(), 2, "bad row dropped, neighbors kept");
        assert_eq!(rows[0].kwh, 5.5);
        assert_eq!(rows[1].kwh, 7.25);
    }

    #[test]
    fn header_only_file_yields_empty_rows() {
        let (_dir, log) = temp_log();
        fs::write(log.path(), "timestamp,kwh\n").expect("seed header");
        let rows = log.readings().expect("read ok").expect("file exists");
        assert!(rows.is_empty());
    }
}
