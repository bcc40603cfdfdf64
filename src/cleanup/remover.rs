//! File Removal
//!
//! Deletion goes through [`FileRemover`] so a pass can be run against
//! something other than the real filesystem.

use std::fs;
use std::io;
use std::path::Path;

/// Deletes a single file.
pub trait FileRemover: Send + Sync {
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Removes files with `std::fs::remove_file`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl FileRemover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
