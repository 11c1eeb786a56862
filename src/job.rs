use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique handle for a registered job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A periodic scan job.
///
/// `update_interval` is how often the job wants to run; `duration` is how
/// long one dispatch occupies a slot. A fragmented job splits one logical
/// update cycle into `fragment_count` dispatches, each paying a fractional
/// share of the update interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanJob {
    pub id: JobId,
    pub name: String,
    pub update_interval: Duration,
    pub duration: Duration,
    pub fragment_count: NonZeroU32,
    /// Position within the current update cycle, wraps at `fragment_count`.
    pub fragments_dispatched: u32,
    /// True while the job occupies a slot. Mutated only by the scheduler.
    pub is_running: bool,
}

impl ScanJob {
    pub fn new(name: impl Into<String>, update_interval: Duration, duration: Duration) -> Self {
        Self::with_fragments(name, update_interval, duration, NonZeroU32::MIN)
    }

    pub fn with_fragments(
        name: impl Into<String>,
        update_interval: Duration,
        duration: Duration,
        fragment_count: NonZeroU32,
    ) -> Self {
        Self {
            id: JobId::new(),
            name: name.into(),
            update_interval,
            duration,
            fragment_count,
            fragments_dispatched: 0,
            is_running: false,
        }
    }

    /// Credit (in seconds) one dispatch of this job costs: the full update
    /// interval, or a fragment's share of it.
    pub fn debit_amount(&self) -> f64 {
        self.update_interval.as_secs_f64() / f64::from(self.fragment_count.get())
    }

    /// Fraction of wall time this job requires to stay on schedule.
    pub fn duty_cycle(&self) -> f64 {
        self.duration.as_secs_f64() / self.update_interval.as_secs_f64()
    }

    pub(crate) fn record_dispatch(&mut self) {
        self.fragments_dispatched = (self.fragments_dispatched + 1) % self.fragment_count.get();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_amount_unfragmented() {
        let job = ScanJob::new("vol", Duration::from_secs(20), Duration::from_secs(10));
        assert_eq!(job.debit_amount(), 20.0);
    }

    #[test]
    fn debit_amount_fragmented() {
        let job = ScanJob::with_fragments(
            "vol",
            Duration::from_secs(20),
            Duration::from_secs(5),
            NonZeroU32::new(4).unwrap(),
        );
        assert_eq!(job.debit_amount(), 5.0);
    }

    #[test]
    fn fragment_cursor_wraps() {
        let mut job = ScanJob::with_fragments(
            "vol",
            Duration::from_secs(20),
            Duration::from_secs(5),
            NonZeroU32::new(3).unwrap(),
        );
        job.record_dispatch();
        job.record_dispatch();
        assert_eq!(job.fragments_dispatched, 2);
        job.record_dispatch();
        assert_eq!(job.fragments_dispatched, 0);
    }

    #[test]
    fn duty_cycle() {
        let job = ScanJob::new("vol", Duration::from_secs(20), Duration::from_secs(10));
        assert_eq!(job.duty_cycle(), 0.5);
    }
}
