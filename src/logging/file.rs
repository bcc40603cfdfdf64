//! Service Log File
//!
//! Appends `YYYY-MM-DD HH:MM:SS - <message>` lines to the configured log file.
//! The file is opened for each write and closed straight after; no handle is
//! held between writes.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::logging::{FallbackSink, Severity};

/// chrono format string for the line prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// == Log Entry ==
/// One line of the service log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    /// Stamps `message` with the current local time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.message
        )
    }
}

// == Service Logger ==
/// File logger with a fallback sink.
///
/// `log` never fails: a write error is reported to the fallback sink together
/// with the message that could not be written.
pub struct ServiceLogger {
    /// Target log file
    path: PathBuf,
    /// Where failed writes go
    fallback: Arc<dyn FallbackSink>,
    /// Serializes appends so lines keep call order
    write_lock: Mutex<()>,
}

impl ServiceLogger {
    // == Constructor ==
    /// Creates a logger appending to `path`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl Into<PathBuf>, fallback: Arc<dyn FallbackSink>) -> Self {
        Self {
            path: path.into(),
            fallback,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Log ==
    /// Appends one timestamped line.
    pub fn log(&self, message: impl Into<String>) {
        let entry = LogEntry::now(message);
        debug!(log_file = %self.path.display(), "{}", entry.message);

        if let Err(e) = self.append(&entry) {
            self.fallback.write_entry(
                Severity::Error,
                &format!("Logging error: {}. Original message: {}", e, entry.message),
            );
        }
    }

    fn append(&self, entry: &LogEntry) -> io::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // One write per line, so a failure cannot leave half a line behind
        let line = format!("{}\n", entry);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl fmt::Debug for ServiceLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLogger")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
