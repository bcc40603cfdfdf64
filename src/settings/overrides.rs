//! Settings Document
//!
//! Decodes `appsettings.json`. Every member is optional; a member only
//! overrides its default when it passes validation:
//! - `TimerIntervalMinutes`: integer in `1..=MAX_POLL_INTERVAL_MINUTES`
//! - `TargetFolderPath`, `LogFilePath`: non-blank strings

use serde::Deserialize;

use crate::error::Result;
use crate::settings::MAX_POLL_INTERVAL_MINUTES;

// == Settings Override ==
/// Raw contents of the settings document, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingsOverride {
    pub timer_interval_minutes: Option<i64>,
    pub target_folder_path: Option<String>,
    pub log_file_path: Option<String>,
}

impl SettingsOverride {
    // == Decode ==
    /// Decodes a settings document.
    ///
    /// Returns `Ok(None)` for a literal `null` document. Malformed JSON or a
    /// member of the wrong type is an error.
    pub fn from_json(text: &str) -> Result<Option<Self>> {
        Ok(serde_json::from_str(text)?)
    }

    /// Interval in minutes, if present and in range.
    pub fn poll_interval_minutes(&self) -> Option<u64> {
        self.timer_interval_minutes
            .and_then(|minutes| u64::try_from(minutes).ok())
            .filter(|minutes| (1..=MAX_POLL_INTERVAL_MINUTES).contains(minutes))
    }

    /// Target folder, if present and not blank.
    pub fn target_folder_path(&self) -> Option<&str> {
        non_blank(self.target_folder_path.as_deref())
    }

    /// Log file, if present and not blank.
    pub fn log_file_path(&self) -> Option<&str> {
        non_blank(self.log_file_path.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
