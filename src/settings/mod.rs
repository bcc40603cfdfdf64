//! Settings Module
//!
//! Resolves the settings a service run uses: hardcoded defaults, overridden
//! field by field from an optional `appsettings.json` document.

mod effective;
mod overrides;
mod resolver;


pub use effective::{
    EffectiveSettings, DEFAULT_LOG_FILE_PATH, DEFAULT_POLL_INTERVAL_MINUTES,
    DEFAULT_TARGET_FOLDER_PATH,
};
pub use overrides::SettingsOverride;
pub use resolver::{resolve, SETTINGS_FILE_NAME};

// == Public Constants ==
/// Largest accepted poll interval in minutes (one year)
pub const MAX_POLL_INTERVAL_MINUTES: u64 = 365 * 24 * 60;
