use thiserror::Error;

use crate::job::JobId;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid concurrency limit: {0} (must be at least 1)")]
    InvalidConcurrency(usize),

    #[error("Job not found: {0}")]
    JobNotFound(JobId),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
