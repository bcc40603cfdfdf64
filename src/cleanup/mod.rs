//! Cleanup Module
//!
//! One cleanup pass removes every regular file directly inside the target
//! folder. Subdirectories and their contents are left alone.

mod pass;
mod remover;
mod stats;

pub use pass::{run_pass, CleanupReport, FileOutcome, FileResult, PassOutcome};
pub use remover::{FileRemover, FsRemover};
pub use stats::CleanupStats;
