//! Cleanup Service
//!
//! Ties resolved settings, the service log and the scheduler together behind
//! a `start`/`stop` lifecycle. Host integration (signals, service managers)
//! lives in the binary; nothing here knows about it.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::cleanup::{run_pass, CleanupReport, CleanupStats, FileRemover, FsRemover};
use crate::config::SERVICE_NAME;
use crate::error::{CleanerError, Result};
use crate::logging::{FallbackSink, ServiceLogger, TIMESTAMP_FORMAT};
use crate::settings::EffectiveSettings;
use crate::tasks::{spawn_periodic, Job, SchedulerHandle};

// == Service State ==
/// Lifecycle position: `Stopped -> Starting -> Running -> Stopping -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceState::Stopped => "stopped",
            ServiceState::Starting => "starting",
            ServiceState::Running => "running",
            ServiceState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

// == Lifecycle ==
/// Start and stop entry points offered to a service host.
#[allow(async_fn_in_trait)]
pub trait Lifecycle {
    /// Begins periodic work. Must be called from within a Tokio runtime.
    fn start(&mut self) -> Result<()>;

    /// Ends periodic work, letting a pass in flight finish.
    async fn stop(&mut self) -> Result<()>;
}

// == Cleanup Service ==
/// Periodically empties the target folder of one service run.
pub struct CleanupService {
    settings: Arc<EffectiveSettings>,
    logger: Arc<ServiceLogger>,
    remover: Arc<dyn FileRemover>,
    stats: Arc<Mutex<CleanupStats>>,
    state: ServiceState,
    scheduler: Option<SchedulerHandle>,
}

impl CleanupService {
    // == Constructor ==
    /// Creates a stopped service deleting through the real filesystem.
    ///
    /// # Arguments
    /// * `settings` - Resolved settings for this run
    /// * `fallback` - Sink for log lines the log file could not take
    pub fn new(settings: EffectiveSettings, fallback: Arc<dyn FallbackSink>) -> Self {
        Self::with_remover(settings, fallback, Arc::new(FsRemover))
    }

    /// Creates a stopped service with a custom deletion strategy.
    pub fn with_remover(
        settings: EffectiveSettings,
        fallback: Arc<dyn FallbackSink>,
        remover: Arc<dyn FileRemover>,
    ) -> Self {
        let logger = Arc::new(ServiceLogger::new(settings.log_file_path(), fallback));
        Self {
            settings: Arc::new(settings),
            logger,
            remover,
            stats: Arc::new(Mutex::new(CleanupStats::new())),
            state: ServiceState::Stopped,
            scheduler: None,
        }
    }

    pub fn settings(&self) -> &EffectiveSettings {
        &self.settings
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    /// Snapshot of the totals for this run.
    pub fn stats(&self) -> CleanupStats {
        self.stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    // == Run Once ==
    /// Runs a single pass on the calling thread, outside the scheduler.
    ///
    /// Only allowed while stopped, so it can never overlap a scheduled pass.
    pub fn run_once(&self) -> Result<CleanupReport> {
        if self.state != ServiceState::Stopped {
            return Err(CleanerError::InvalidTransition {
                action: "run a single pass",
                state: self.state,
            });
        }
        Ok(sweep(
            &self.settings,
            &self.logger,
            self.remover.as_ref(),
            &self.stats,
        ))
    }

    fn cleanup_job(&self) -> Job {
        let settings = Arc::clone(&self.settings);
        let logger = Arc::clone(&self.logger);
        let remover = Arc::clone(&self.remover);
        let stats = Arc::clone(&self.stats);
        Arc::new(move || {
            sweep(&settings, &logger, remover.as_ref(), &stats);
        })
    }
}

fn sweep(
    settings: &EffectiveSettings,
    logger: &ServiceLogger,
    remover: &dyn FileRemover,
    stats: &Mutex<CleanupStats>,
) -> CleanupReport {
    let report = run_pass(settings.target_folder_path(), logger, remover);
    stats
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .record(&report);
    report
}

impl Lifecycle for CleanupService {
    fn start(&mut self) -> Result<()> {
        if self.state != ServiceState::Stopped {
            return Err(CleanerError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        self.state = ServiceState::Starting;

        // Logged first so the start-up pass lines follow it
        self.logger.log(format!("{} service started.", SERVICE_NAME));
        self.scheduler = Some(spawn_periodic(
            self.settings.poll_interval(),
            self.cleanup_job(),
        ));

        info!(
            "Service running: interval={}min, target={}",
            self.settings.poll_interval_minutes(),
            self.settings.target_folder_path().display()
        );
        self.state = ServiceState::Running;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        match self.state {
            ServiceState::Running => {}
            ServiceState::Stopped => {
                debug!("Stop requested while already stopped");
                return Ok(());
            }
            state => {
                return Err(CleanerError::InvalidTransition {
                    action: "stop",
                    state,
                })
            }
        }
        self.state = ServiceState::Stopping;

        let result = match self.scheduler.take() {
            Some(handle) => handle.stop().await,
            None => Ok(()),
        };

        self.logger.log(format!("{} service stopped.", SERVICE_NAME));
        let stats = self.stats();
        let last_pass_at = stats
            .last_pass_at
            .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "never".to_string());
        info!(
            passes = stats.passes,
            files_deleted = stats.files_deleted,
            delete_failures = stats.delete_failures,
            failed_passes = stats.failed_passes,
            success_rate = stats.success_rate(),
            last_pass_at = %last_pass_at,
            "Service stopped"
        );

        self.state = ServiceState::Stopped;
        result
    }
}

impl fmt::Debug for CleanupService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupService")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
