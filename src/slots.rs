use std::time::Duration;

use crate::job::{JobId, ScanJob};

#[derive(Debug, Clone)]
struct Occupant {
    job_id: JobId,
    duration: Duration,
    active_elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    occupant: Option<Occupant>,
}

/// Fixed pool of concurrent execution slots.
///
/// Each occupied slot tracks how long its job has been active; a slot frees
/// itself the first time `advance` observes the job's full duration. There
/// is no preemption: an occupant holds its slot for exactly its declared
/// duration.
#[derive(Debug)]
pub struct SlotManager {
    slots: Vec<Slot>,
}

impl SlotManager {
    /// The caller validates `concurrent_max >= 1` before construction;
    /// violating it here is a programming error.
    pub fn new(concurrent_max: usize) -> Self {
        assert!(concurrent_max >= 1, "slot pool must hold at least one slot");
        Self {
            slots: vec![Slot::default(); concurrent_max],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.occupant.is_some()).count()
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(|s| s.occupant.is_none())
    }

    /// Occupy a free slot with `job` and mark it running.
    ///
    /// Panics if no slot is free or the job is already running; dispatch
    /// checks both before calling, so either is an invariant breach.
    pub fn assign(&mut self, job: &mut ScanJob) {
        assert!(!job.is_running, "job is already occupying a slot");
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.occupant.is_none())
            .expect("assign called with no free slot");
        slot.occupant = Some(Occupant {
            job_id: job.id,
            duration: job.duration,
            active_elapsed: Duration::ZERO,
        });
        job.is_running = true;
        tracing::debug!(job_id = %job.id, name = %job.name, "slot occupied");
    }

    /// Accrue active time on every occupied slot and free those whose
    /// occupant has served its full duration. Returns the ids of the jobs
    /// that finished; the scheduler clears their running flags.
    pub fn advance(&mut self, dt: Duration) -> Vec<JobId> {
        let mut finished = Vec::new();
        for slot in &mut self.slots {
            if let Some(occupant) = &mut slot.occupant {
                occupant.active_elapsed += dt;
                if occupant.active_elapsed >= occupant.duration {
                    finished.push(occupant.job_id);
                    slot.occupant = None;
                }
            }
        }
        finished
    }

    pub fn is_occupied_by(&self, job_id: JobId) -> bool {
        self.slots
            .iter()
            .any(|s| s.occupant.as_ref().is_some_and(|o| o.job_id == job_id))
    }
}
