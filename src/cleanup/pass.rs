//! Cleanup Pass
//!
//! Enumerates the target folder and deletes each file on its own. A file
//! that cannot be deleted is logged and skipped; it gets another chance on
//! the next pass. Nothing escapes a pass as an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cleanup::FileRemover;
use crate::logging::ServiceLogger;

// == Outcomes ==
/// Result of one delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Deleted,
    DeleteFailed(String),
}

/// One discovered file and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// How a pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Target folder absent; nothing attempted
    TargetMissing,
    /// Target folder held no files
    NoFiles,
    /// Every discovered file was attempted
    Completed,
    /// An error outside the per-file loop ended the pass early
    Failed(String),
}

// == Cleanup Report ==
/// Transient summary of a single pass. Only ever logged, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub target: PathBuf,
    pub outcome: PassOutcome,
    pub files: Vec<FileResult>,
}

impl CleanupReport {
    fn new(target: &Path) -> Self {
        Self {
            target: target.to_path_buf(),
            outcome: PassOutcome::Completed,
            files: Vec::new(),
        }
    }

    /// Number of files found at the start of the pass
    pub fn discovered(&self) -> usize {
        self.files.len()
    }

    pub fn deleted(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Deleted)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.discovered() - self.deleted()
    }
}

// == Run Pass ==
/// Runs one cleanup pass over `target`.
///
/// # Arguments
/// * `target` - Folder whose immediate files are deleted
/// * `logger` - Service log receiving one line per event
/// * `remover` - Performs the actual deletions
pub fn run_pass(target: &Path, logger: &ServiceLogger, remover: &dyn FileRemover) -> CleanupReport {
    run_pass_with(target, logger, remover, list_files)
}

fn run_pass_with<L>(
    target: &Path,
    logger: &ServiceLogger,
    remover: &dyn FileRemover,
    list: L,
) -> CleanupReport
where
    L: Fn(&Path) -> io::Result<Vec<PathBuf>>,
{
    let mut report = CleanupReport::new(target);

    match delete_files(target, logger, remover, list, &mut report) {
        Ok(outcome) => report.outcome = outcome,
        Err(e) => {
            warn!("Cleanup of {} aborted: {}", target.display(), e);
            logger.log(format!("Error during cleanup: {}", e));
            report.outcome = PassOutcome::Failed(e.to_string());
        }
    }

    info!(
        target_folder = %target.display(),
        discovered = report.discovered(),
        deleted = report.deleted(),
        failed = report.failed(),
        "Cleanup pass finished"
    );
    report
}

fn delete_files<L>(
    target: &Path,
    logger: &ServiceLogger,
    remover: &dyn FileRemover,
    list: L,
    report: &mut CleanupReport,
) -> io::Result<PassOutcome>
where
    L: Fn(&Path) -> io::Result<Vec<PathBuf>>,
{
    if !target.is_dir() {
        logger.log(format!("Target folder does not exist: {}", target.display()));
        return Ok(PassOutcome::TargetMissing);
    }

    let files = list(target)?;
    if files.is_empty() {
        logger.log(format!("No files found in {}", target.display()));
        return Ok(PassOutcome::NoFiles);
    }

    logger.log(format!(
        "Found {} file(s) in {}. Starting deletion...",
        files.len(),
        target.display()
    ));

    for path in files {
        let outcome = match remover.remove(&path) {
            Ok(()) => {
                logger.log(format!("Deleted: {}", path.display()));
                FileOutcome::Deleted
            }
            Err(e) => {
                debug!("Delete failed for {}: {}", path.display(), e);
                logger.log(format!("Error deleting {}: {}", path.display(), e));
                FileOutcome::DeleteFailed(e.to_string())
            }
        };
        report.files.push(FileResult { path, outcome });
    }

    logger.log("Cleanup completed.");
    Ok(PassOutcome::Completed)
}

/// Regular files directly inside `dir`, following symlinks.
fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::FsRemover;
    use crate::logging::MemorySink;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Refuses to delete files with the given names
    struct LockedFiles(HashSet<&'static str>);

    impl FileRemover for LockedFiles {
        fn remove(&self, path: &Path) -> io::Result<()> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if self.0.contains(name) {
                Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "file is locked",
                ))
            } else {
                fs::remove_file(path)
            }
        }
    }

    struct Fixture {
        _root: tempfile::TempDir,
        target: PathBuf,
        log_path: PathBuf,
        logger: ServiceLogger,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("target");
        let log_path = root.path().join("logs").join("log.txt");
        let logger = ServiceLogger::new(&log_path, Arc::new(MemorySink::new()));
        Fixture {
            _root: root,
            target,
            log_path,
            logger,
        }
    }

    fn log_messages(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|line| line.split_once(" - ").unwrap().1.to_string())
            .collect()
    }

    #[test]
    fn test_missing_target_logs_once() {
        let fx = fixture();

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.outcome, PassOutcome::TargetMissing);
        assert_eq!(report.discovered(), 0);
        assert_eq!(
            log_messages(&fx.log_path),
            vec![format!("Target folder does not exist: {}", fx.target.display())]
        );
    }

    #[test]
    fn test_target_that_is_a_file_counts_as_missing() {
        let fx = fixture();
        fs::write(&fx.target, b"i am a file").unwrap();

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.outcome, PassOutcome::TargetMissing);
        assert!(fx.target.exists());
    }

    #[test]
    fn test_empty_target_logs_once() {
        let fx = fixture();
        fs::create_dir_all(&fx.target).unwrap();

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.outcome, PassOutcome::NoFiles);
        assert_eq!(
            log_messages(&fx.log_path),
            vec![format!("No files found in {}", fx.target.display())]
        );
    }

    #[test]
    fn test_deletes_all_files() {
        let fx = fixture();
        fs::create_dir_all(&fx.target).unwrap();
        for name in ["one.tmp", "two.log", "three"] {
            fs::write(fx.target.join(name), name).unwrap();
        }

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.outcome, PassOutcome::Completed);
        assert_eq!(report.discovered(), 3);
        assert_eq!(report.deleted(), 3);
        assert_eq!(fs::read_dir(&fx.target).unwrap().count(), 0);

        let messages = log_messages(&fx.log_path);
        assert_eq!(
            messages[0],
            format!(
                "Found 3 file(s) in {}. Starting deletion...",
                fx.target.display()
            )
        );
        assert_eq!(
            messages.iter().filter(|m| m.starts_with("Deleted: ")).count(),
            3
        );
        assert_eq!(messages.last().unwrap(), "Cleanup completed.");
    }

    #[test]
    fn test_locked_file_does_not_abort_batch() {
        let fx = fixture();
        fs::create_dir_all(&fx.target).unwrap();
        for name in ["a", "b", "c"] {
            fs::write(fx.target.join(name), name).unwrap();
        }
        let remover = LockedFiles(["b"].into_iter().collect());

        let report = run_pass(&fx.target, &fx.logger, &remover);

        assert_eq!(report.outcome, PassOutcome::Completed);
        assert_eq!(report.deleted(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!fx.target.join("a").exists());
        assert!(fx.target.join("b").exists());
        assert!(!fx.target.join("c").exists());

        let messages = log_messages(&fx.log_path);
        let b = fx.target.join("b");
        assert!(messages.contains(&format!("Deleted: {}", fx.target.join("a").display())));
        assert!(messages.contains(&format!("Deleted: {}", fx.target.join("c").display())));
        assert!(messages.contains(&format!("Error deleting {}: file is locked", b.display())));
        assert_eq!(messages.last().unwrap(), "Cleanup completed.");

        let failed = report
            .files
            .iter()
            .find(|f| f.path == b)
            .unwrap();
        assert_eq!(
            failed.outcome,
            FileOutcome::DeleteFailed("file is locked".to_string())
        );
    }

    #[test]
    fn test_subdirectories_untouched() {
        let fx = fixture();
        let nested = fx.target.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("inner.txt"), b"keep").unwrap();
        fs::write(fx.target.join("top.txt"), b"drop").unwrap();

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.discovered(), 1);
        assert!(!fx.target.join("top.txt").exists());
        assert!(nested.join("inner.txt").exists());
    }

    #[test]
    fn test_only_subdirectories_means_no_files() {
        let fx = fixture();
        fs::create_dir_all(fx.target.join("nested")).unwrap();

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.outcome, PassOutcome::NoFiles);
        assert!(fx.target.join("nested").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_skipped() {
        let fx = fixture();
        let elsewhere = fx._root.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        fs::write(elsewhere.join("precious.txt"), b"keep").unwrap();
        fs::create_dir_all(&fx.target).unwrap();
        std::os::unix::fs::symlink(&elsewhere, fx.target.join("link")).unwrap();

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);

        assert_eq!(report.outcome, PassOutcome::NoFiles);
        assert!(elsewhere.join("precious.txt").exists());
    }

    #[test]
    fn test_enumeration_error_ends_pass() {
        let fx = fixture();
        fs::create_dir_all(&fx.target).unwrap();
        fs::write(fx.target.join("untouched"), b"x").unwrap();

        let report = run_pass_with(&fx.target, &fx.logger, &FsRemover, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "device went away"))
        });

        assert_eq!(
            report.outcome,
            PassOutcome::Failed("device went away".to_string())
        );
        assert_eq!(report.discovered(), 0);
        assert!(fx.target.join("untouched").exists());
        assert_eq!(
            log_messages(&fx.log_path),
            vec!["Error during cleanup: device went away".to_string()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_target_ends_pass() {
        use std::os::unix::fs::PermissionsExt;

        let fx = fixture();
        fs::create_dir_all(&fx.target).unwrap();
        fs::write(fx.target.join("kept"), b"x").unwrap();
        fs::set_permissions(&fx.target, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read the directory anyway; nothing to check then
        if fs::read_dir(&fx.target).is_ok() {
            fs::set_permissions(&fx.target, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = run_pass(&fx.target, &fx.logger, &FsRemover);
        fs::set_permissions(&fx.target, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(report.outcome, PassOutcome::Failed(_)));
        let messages = log_messages(&fx.log_path);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Error during cleanup: "));
        assert!(fx.target.join("kept").exists());
    }

    #[test]
    fn test_report_counts() {
        let report = CleanupReport {
            target: PathBuf::from("/t"),
            outcome: PassOutcome::Completed,
            files: vec![
                FileResult {
                    path: PathBuf::from("/t/a"),
                    outcome: FileOutcome::Deleted,
                },
                FileResult {
                    path: PathBuf::from("/t/b"),
                    outcome: FileOutcome::DeleteFailed("busy".to_string()),
                },
            ],
        };
        assert_eq!(report.discovered(), 2);
        assert_eq!(report.deleted(), 1);
        assert_eq!(report.failed(), 1);
    }
}
