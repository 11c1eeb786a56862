use std::collections::HashSet;
use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::job::{JobId, ScanJob};
use crate::ledger::CreditLedger;
use crate::policy::{self, Selection};
use crate::slots::SlotManager;

/// Credit-based adaptive scan scheduler.
///
/// Registered jobs accrue credit with elapsed time and are dispatched onto
/// a fixed pool of slots when their credit reaches the action threshold; a
/// distinguished surveillance job fills every slot no regular job claims.
/// The caller drives the scheduler tick by tick: `advance_timer` first,
/// then `dispatch`. Within one tick, credit accrual happens before slot
/// completion checks, which happen before any dispatch decision; a slot
/// vacated this tick is dispatchable this tick, and a dispatch this tick
/// completes on a later one.
#[derive(Debug)]
pub struct Scheduler {
    jobs: Vec<ScanJob>,
    ledger: CreditLedger,
    slots: SlotManager,
    surveillance: ScanJob,
    pending_removal: HashSet<JobId>,
    action_threshold: f64,
}

impl Scheduler {
    pub fn new(surveillance: ScanJob, config: SchedulerConfig) -> Result<Self> {
        if config.concurrent_max < 1 {
            return Err(SchedulerError::InvalidConcurrency(config.concurrent_max));
        }
        Ok(Self {
            jobs: Vec::new(),
            ledger: CreditLedger::new(),
            slots: SlotManager::new(config.concurrent_max),
            surveillance,
            pending_removal: HashSet::new(),
            action_threshold: config.action_threshold,
        })
    }

    /// Register jobs, preserving their order. Each starts with zero credit.
    pub fn add_jobs(&mut self, jobs: Vec<ScanJob>) {
        self.ledger.register(jobs.len());
        for job in &jobs {
            tracing::info!(job_id = %job.id, name = %job.name, "job registered");
        }
        self.jobs.extend(jobs);
    }

    /// Remove jobs by id. An idle job is dropped immediately; a running job
    /// is excluded from dispatch at once but keeps its slot until its
    /// current activation completes, and is dropped on the tick that frees
    /// it. An unknown id fails the whole call before any job is touched.
    pub fn remove_jobs(&mut self, ids: &[JobId]) -> Result<()> {
        let mut indices = Vec::with_capacity(ids.len());
        for id in ids {
            let index = self
                .index_of(*id)
                .ok_or(SchedulerError::JobNotFound(*id))?;
            indices.push(index);
        }

        let mut drop_now = Vec::new();
        for index in indices {
            let job = &self.jobs[index];
            if job.is_running {
                tracing::info!(job_id = %job.id, name = %job.name, "removal deferred until slot frees");
                self.pending_removal.insert(job.id);
            } else {
                drop_now.push(index);
            }
        }
        self.drop_jobs(drop_now);
        Ok(())
    }

    /// Advance the scheduler clock by one tick.
    ///
    /// Accrues credit on every registered job, then ages the occupied
    /// slots, freeing any whose occupant served its full duration, then
    /// drops jobs whose deferred removal just became possible.
    pub fn advance_timer(&mut self, dt: Duration) {
        self.ledger.advance(dt);

        for job_id in self.slots.advance(dt) {
            if job_id == self.surveillance.id {
                self.surveillance.is_running = false;
            } else if let Some(job) = self.jobs.iter_mut().find(|j| j.id == job_id) {
                job.is_running = false;
                tracing::debug!(job_id = %job.id, name = %job.name, "job finished");
            }
        }

        let removable: Vec<usize> = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| !job.is_running && self.pending_removal.contains(&job.id))
            .map(|(index, _)| index)
            .collect();
        self.drop_jobs(removable);
    }

    /// Fill the free slots for this tick, returning the dispatched job ids
    /// (0 up to `concurrent_max` of them).
    ///
    /// Each free slot gets one selection round: the winning regular job is
    /// debited and assigned, flipping its running flag immediately so it
    /// cannot win a second slot this tick. When no regular job qualifies
    /// the surveillance job takes the slot, and once surveillance itself is
    /// running the remaining slots stay idle this round.
    pub fn dispatch(&mut self) -> Vec<JobId> {
        let mut dispatched = Vec::new();
        while self.slots.has_free_slot() {
            let selection = policy::select(
                &self.jobs,
                self.ledger.credits(),
                &self.pending_removal,
                self.action_threshold,
            );
            match selection {
                Selection::Job(index) => {
                    let amount = self.jobs[index].debit_amount();
                    self.ledger.debit(index, amount);
                    let job = &mut self.jobs[index];
                    job.record_dispatch();
                    self.slots.assign(job);
                    tracing::info!(
                        job_id = %job.id,
                        name = %job.name,
                        credit = self.ledger.credit(index),
                        "job dispatched"
                    );
                    dispatched.push(job.id);
                }
                Selection::Surveillance => {
                    if self.surveillance.is_running {
                        break;
                    }
                    self.slots.assign(&mut self.surveillance);
                    tracing::debug!(job_id = %self.surveillance.id, "surveillance dispatched");
                    dispatched.push(self.surveillance.id);
                }
            }
        }
        dispatched
    }

    /// Total duty cycle demanded by the registered jobs plus surveillance.
    /// A value above 1.0 means the schedule is infeasible; informational
    /// only, nothing enforces it.
    pub fn occupancy(&self) -> f64 {
        self.jobs
            .iter()
            .chain(std::iter::once(&self.surveillance))
            .map(ScanJob::duty_cycle)
            .sum()
    }

    /// Longest update interval any job tolerates, surveillance included.
    /// Callers use this to size their tick granularity.
    pub fn acquisition(&self) -> Duration {
        self.jobs
            .iter()
            .map(|job| job.update_interval)
            .chain(std::iter::once(self.surveillance.update_interval))
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn job(&self, id: JobId) -> Option<&ScanJob> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn jobs(&self) -> &[ScanJob] {
        &self.jobs
    }

    pub fn surveillance(&self) -> &ScanJob {
        &self.surveillance
    }

    /// Current credit of a registered job, in seconds.
    pub fn credit(&self, id: JobId) -> Option<f64> {
        self.index_of(id).map(|index| self.ledger.credit(index))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn index_of(&self, id: JobId) -> Option<usize> {
        self.jobs.iter().position(|job| job.id == id)
    }

    /// Drop jobs and their ledger entries. Removal runs highest index
    /// first so the still-pending indices stay valid.
    fn drop_jobs(&mut self, mut indices: Vec<usize>) {
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        self.ledger.deregister(&indices);
        for index in indices {
            let job = self.jobs.remove(index);
            self.pending_removal.remove(&job.id);
            tracing::info!(job_id = %job.id, name = %job.name, "job removed");
        }
    }
}
