//! Settings Resolver
//!
//! Looks for `appsettings.json` in the settings directory and merges it over
//! the defaults. Resolution cannot fail: a missing or broken document leaves
//! the defaults in place and is reported to the fallback sink, since the log
//! file location is not known yet at this point.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::logging::{FallbackSink, Severity};
use crate::settings::{EffectiveSettings, SettingsOverride};

/// File name of the settings document inside the settings directory
pub const SETTINGS_FILE_NAME: &str = "appsettings.json";

// == Resolve ==
/// Produces the effective settings for a service run.
///
/// # Arguments
/// * `settings_directory` - Directory holding the settings document; a blank
///   path skips the lookup entirely
/// * `sink` - Receives the not-found note or the decode error
pub fn resolve(settings_directory: &Path, sink: &dyn FallbackSink) -> EffectiveSettings {
    let defaults = EffectiveSettings::default();

    if settings_directory.to_string_lossy().trim().is_empty() {
        return defaults;
    }

    let document = settings_directory.join(SETTINGS_FILE_NAME);
    if !document.is_file() {
        sink.write_entry(
            Severity::Information,
            &format!(
                "Settings file not found at '{}'. Using defaults.",
                document.display()
            ),
        );
        return defaults;
    }

    match load(&document) {
        Ok(Some(overrides)) => {
            let settings = defaults.with_overrides(&overrides);
            info!(
                "Settings loaded from {}: interval={}min, target={}, log={}",
                document.display(),
                settings.poll_interval_minutes(),
                settings.target_folder_path().display(),
                settings.log_file_path().display()
            );
            settings
        }
        Ok(None) => defaults,
        Err(e) => {
            sink.write_entry(
                Severity::Error,
                &format!("Error reading external settings: {}. Using defaults.", e),
            );
            defaults
        }
    }
}

fn load(document: &Path) -> Result<Option<SettingsOverride>> {
    let text = fs::read_to_string(document)?;
    SettingsOverride::from_json(&text)
}
