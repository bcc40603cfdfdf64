//! Fallback Event Sink
//!
//! Stand-in for the platform event log. Written only when the primary log
//! file fails, or while settings are being resolved and no log file is known.

use std::fmt;
use std::sync::Mutex;

use tracing::{error, info};

use crate::config::SERVICE_NAME;

// == Severity ==
/// Severity attached to a fallback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Information => f.write_str("information"),
            Severity::Error => f.write_str("error"),
        }
    }
}

// == Fallback Sink Trait ==
/// Append-only event channel of last resort.
///
/// Implementations must not fail or panic; there is nowhere left to report to.
pub trait FallbackSink: Send + Sync {
    /// Records one entry.
    fn write_entry(&self, severity: Severity, message: &str);
}

// == Tracing Sink ==
/// Emits fallback entries as `tracing` events tagged with a source identifier.
///
/// Under a service manager the subscriber's output (stderr) is what ends up
/// in the platform log.
#[derive(Debug, Clone)]
pub struct TracingSink {
    source: &'static str,
}

impl TracingSink {
    pub fn new(source: &'static str) -> Self {
        Self { source }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl FallbackSink for TracingSink {
    fn write_entry(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Information => info!(source = self.source, "{}", message),
            Severity::Error => error!(source = self.source, "{}", message),
        }
    }
}

// == Memory Sink ==
/// One entry captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEntry {
    pub severity: Severity,
    pub message: String,
}

/// Keeps fallback entries in memory. Useful for tests and for embedding the
/// service where the host collects events itself.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<SinkEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn entries(&self) -> Vec<SinkEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FallbackSink for MemorySink {
    fn write_entry(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SinkEntry {
                severity,
                message: message.to_string(),
            });
    }
}
