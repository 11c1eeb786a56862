use std::time::Duration;

/// Per-job credit accounting.
///
/// Holds one credit value per registered job, indexed in parallel with the
/// scheduler's job list. Credit is measured in seconds: it grows with
/// elapsed time and is debited by a job's update interval (or a fragment's
/// share of it) when the job is dispatched. A negative credit means the job
/// is ahead of schedule.
#[derive(Debug, Default)]
pub struct CreditLedger {
    credits: Vec<f64>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `count` zero-balance entries, one per newly registered job.
    pub fn register(&mut self, count: usize) {
        self.credits.extend(std::iter::repeat(0.0).take(count));
    }

    /// Accrue elapsed time on every entry. Called exactly once per tick,
    /// before slot completion checks and dispatch.
    pub fn advance(&mut self, dt: Duration) {
        let secs = dt.as_secs_f64();
        for credit in &mut self.credits {
            *credit += secs;
        }
    }

    /// Charge a job for one dispatch.
    pub fn debit(&mut self, index: usize, amount_secs: f64) {
        self.credits[index] -= amount_secs;
    }

    /// Drop the entries at `indices`. Entries are removed highest index
    /// first; removing in ascending order would shift later entries and
    /// corrupt the remaining indices.
    pub fn deregister(&mut self, indices: &[usize]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for index in sorted {
            self.credits.remove(index);
        }
    }

    pub fn credit(&self, index: usize) -> f64 {
        self.credits[index]
    }

    pub fn credits(&self) -> &[f64] {
        &self.credits
    }

    pub fn len(&self) -> usize {
        self.credits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }
}
