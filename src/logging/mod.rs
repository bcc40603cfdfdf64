//! Logging Module
//!
//! The service keeps its own append-only log file. When that file cannot be
//! written, the line is rerouted to a fallback event sink so it always lands
//! somewhere observable.
//!
//! # Components
//! - [`ServiceLogger`]: timestamped lines appended to the configured log file
//! - [`FallbackSink`]: platform event channel used when the file is unavailable

mod file;
mod sink;

pub use file::{LogEntry, ServiceLogger, TIMESTAMP_FORMAT};
pub use sink::{FallbackSink, MemorySink, Severity, SinkEntry, TracingSink};
