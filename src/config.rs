use serde::{Deserialize, Serialize};

/// Configuration for the scan scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of concurrent execution slots. Must be at least 1.
    pub concurrent_max: usize,

    /// Credit (in seconds) a job must have accrued before it becomes
    /// eligible for dispatch. Raising this above zero delays activation of
    /// under-scheduled jobs, leaving slack for the surveillance fallback.
    pub action_threshold: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            concurrent_max: 1,
            action_threshold: 0.0,
        }
    }
}

impl SchedulerConfig {
    pub fn new(concurrent_max: usize) -> Self {
        Self {
            concurrent_max,
            ..Default::default()
        }
    }

    pub fn with_concurrent_max(mut self, concurrent_max: usize) -> Self {
        self.concurrent_max = concurrent_max;
        self
    }

    pub fn with_action_threshold(mut self, action_threshold: f64) -> Self {
        self.action_threshold = action_threshold;
        self
    }
}
