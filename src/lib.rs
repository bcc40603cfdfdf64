//! Temp Folder Remover - a background service that empties a folder on a timer
//!
//! Every pass deletes the regular files directly inside one target folder and
//! records each outcome in an append-only log file.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod settings;
pub mod tasks;

pub use config::Config;
pub use error::{CleanerError, Result};
pub use service::{CleanupService, Lifecycle, ServiceState};
pub use settings::EffectiveSettings;
