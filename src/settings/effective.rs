//! Effective Settings
//!
//! The configuration one service run works with. Built once at startup and
//! never changed afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::settings::{SettingsOverride, MAX_POLL_INTERVAL_MINUTES};

/// Poll interval used when nothing valid overrides it
pub const DEFAULT_POLL_INTERVAL_MINUTES: u64 = 5;

#[cfg(windows)]
pub const DEFAULT_TARGET_FOLDER_PATH: &str = r"C:\TempToClean";
#[cfg(not(windows))]
pub const DEFAULT_TARGET_FOLDER_PATH: &str = "/var/tmp/temp-to-clean";

#[cfg(windows)]
pub const DEFAULT_LOG_FILE_PATH: &str = r"C:\TempFolderRemover\log.txt";
#[cfg(not(windows))]
pub const DEFAULT_LOG_FILE_PATH: &str = "/var/log/temp-folder-remover/log.txt";

// == Effective Settings ==
/// Resolved settings for a service run.
///
/// `poll_interval_minutes` is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EffectiveSettings {
    #[serde(rename = "TimerIntervalMinutes")]
    poll_interval_minutes: u64,
    target_folder_path: PathBuf,
    log_file_path: PathBuf,
}

impl EffectiveSettings {
    /// Builds settings from explicit values.
    ///
    /// An interval outside `1..=MAX_POLL_INTERVAL_MINUTES` falls back to the
    /// default.
    pub fn new(
        poll_interval_minutes: u64,
        target_folder_path: impl Into<PathBuf>,
        log_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            poll_interval_minutes: if (1..=MAX_POLL_INTERVAL_MINUTES)
                .contains(&poll_interval_minutes)
            {
                poll_interval_minutes
            } else {
                DEFAULT_POLL_INTERVAL_MINUTES
            },
            target_folder_path: target_folder_path.into(),
            log_file_path: log_file_path.into(),
        }
    }

    // == Override Merge ==
    /// Applies the valid fields of `overrides`; invalid or absent fields
    /// leave the current value in place.
    pub fn with_overrides(mut self, overrides: &SettingsOverride) -> Self {
        if let Some(minutes) = overrides.poll_interval_minutes() {
            self.poll_interval_minutes = minutes;
        }
        if let Some(path) = overrides.target_folder_path() {
            self.target_folder_path = PathBuf::from(path);
        }
        if let Some(path) = overrides.log_file_path() {
            self.log_file_path = PathBuf::from(path);
        }
        self
    }

    pub fn poll_interval_minutes(&self) -> u64 {
        self.poll_interval_minutes
    }

    /// Timer period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_minutes.saturating_mul(60))
    }

    pub fn target_folder_path(&self) -> &Path {
        &self.target_folder_path
    }

    pub fn log_file_path(&self) -> &Path {
        &self.log_file_path
    }
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            poll_interval_minutes: DEFAULT_POLL_INTERVAL_MINUTES,
            target_folder_path: PathBuf::from(DEFAULT_TARGET_FOLDER_PATH),
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
        }
    }
}
