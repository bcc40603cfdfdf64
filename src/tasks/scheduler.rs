//! Periodic Scheduler
//!
//! Background task that runs a blocking job once immediately and then on a
//! fixed period until stopped.
//!
//! Passes never overlap: the job runs inside the one scheduler task, and
//! ticks missed while it was running are skipped rather than queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::error::Result;

/// Job run on every tick. Runs on the blocking thread pool.
pub type Job = Arc<dyn Fn() + Send + Sync + 'static>;

// == Scheduler Handle ==
/// Owns the lifecycle of a running scheduler.
///
/// Dropping the handle disarms the timer as well; [`SchedulerHandle::stop`]
/// additionally waits for a pass that is already running.
#[derive(Debug)]
pub struct SchedulerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    // == Stop ==
    /// Disarms the timer and waits for the scheduler task to exit.
    ///
    /// A pass in flight is allowed to finish; it is never interrupted. The
    /// start-up pass always runs, even when stop follows start immediately.
    pub async fn stop(self) -> Result<()> {
        // The task may already be gone, in which case there is nobody to tell
        let _ = self.shutdown.send(());
        self.task.await?;
        Ok(())
    }
}

// == Spawn Periodic ==
/// Spawns a background task running `job` now and then every `period`.
///
/// # Arguments
/// * `period` - Time between the starts of consecutive ticks; must be non-zero
/// * `job` - Blocking work run on each tick
///
/// # Returns
/// A handle used to stop the task during shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_periodic(Duration::from_secs(300), Arc::new(|| sweep()));
/// // Later, during shutdown:
/// handle.stop().await?;
/// ```
pub fn spawn_periodic(period: Duration, job: Job) -> SchedulerHandle {
    let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        info!("Starting cleanup scheduler with interval of {:?}", period);

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Start-up pass runs before shutdown is ever looked at
        ticker.tick().await;
        run_job(&job).await;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => {
                    debug!("Scheduler received shutdown");
                    break;
                }
                _ = ticker.tick() => run_job(&job).await,
            }
        }

        info!("Cleanup scheduler stopped");
    });

    SchedulerHandle { shutdown, task }
}

async fn run_job(job: &Job) {
    let job = Arc::clone(job);
    if let Err(e) = tokio::task::spawn_blocking(move || job()).await {
        error!("Scheduled pass panicked: {}", e);
    }
}
