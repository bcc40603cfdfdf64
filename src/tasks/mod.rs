//! Background Tasks Module
//!
//! Contains the timer that drives cleanup passes while the service runs.
//!
//! # Tasks
//! - Periodic Scheduler: runs a job at start-up and then at a fixed interval

mod scheduler;

pub use scheduler::{spawn_periodic, Job, SchedulerHandle};
