//! Configuration Module
//!
//! Static process configuration. It only answers one question: where does
//! the external settings document live. Everything else is resolved from
//! that document by [`crate::settings`].

use std::env;
use std::path::PathBuf;

// == Service Identity ==
/// Name the service registers under; also the fallback sink source.
pub const SERVICE_NAME: &str = "TempFolderRemover";

/// Human readable service name.
pub const DISPLAY_NAME: &str = "Temp Folder Remover Service";

/// One-line service description.
pub const DESCRIPTION: &str =
    "Automatically removes files from a specified temporary folder at regular intervals.";

/// Environment variable naming the settings directory.
pub const SETTINGS_DIRECTORY_VAR: &str = "SETTINGS_DIRECTORY";

#[cfg(windows)]
pub const DEFAULT_SETTINGS_DIRECTORY: &str = r"C:\TempFolderRemoverSettings";
#[cfg(not(windows))]
pub const DEFAULT_SETTINGS_DIRECTORY: &str = "/etc/temp-folder-remover";

/// Static configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory expected to contain `appsettings.json`.
    /// An empty path disables external settings.
    pub settings_directory: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SETTINGS_DIRECTORY` - Settings document directory (default: platform specific)
    ///
    /// A variable that is set but empty is kept as-is and disables
    /// external settings.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            settings_directory: lookup(SETTINGS_DIRECTORY_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_DIRECTORY)),
        }
    }

    /// Replaces the settings directory, e.g. from a command line flag.
    pub fn with_settings_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings_directory = dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_directory: PathBuf::from(DEFAULT_SETTINGS_DIRECTORY),
        }
    }
}
