//! Error types for the cleanup service
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::service::ServiceState;

// == Cleaner Error Enum ==
/// Unified error type for the cleanup service.
///
/// None of these reach the scheduler: the cleanup pass and the logger turn
/// every failure into a log line. They surface from settings decoding and
/// lifecycle calls only.
#[derive(Error, Debug)]
pub enum CleanerError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings document could not be decoded
    #[error("Invalid settings document: {0}")]
    Settings(#[from] serde_json::Error),

    /// Lifecycle call made from the wrong state
    #[error("Cannot {action} while the service is {state}")]
    InvalidTransition {
        action: &'static str,
        state: ServiceState,
    },

    /// Scheduler task ended abnormally
    #[error("Scheduler task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// == Result Type Alias ==
/// Convenience Result type for the cleanup service.
pub type Result<T> = std::result::Result<T, CleanerError>;
