//! Credit-based adaptive scheduler for periodic scan jobs.
//!
//! Jobs declare how often they want to run and how long one activation
//! takes; the scheduler interleaves them onto a fixed number of execution
//! slots, falling back to a surveillance job whenever nothing else is due.

pub mod config;
pub mod error;
pub mod job;
pub mod ledger;
pub mod policy;
pub mod scheduler;
pub mod slots;

pub use config::SchedulerConfig;
pub use error::{Result, SchedulerError};
pub use job::{JobId, ScanJob};
pub use scheduler::Scheduler;
