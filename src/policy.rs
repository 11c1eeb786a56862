use std::collections::HashSet;

use crate::job::{JobId, ScanJob};

/// Outcome of one selection round for a single free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Dispatch the regular job at this index.
    Job(usize),
    /// No regular job qualifies; fall back to the surveillance job.
    Surveillance,
}

/// Pick the next job to run for one free slot.
///
/// The candidate is the registered job with the greatest credit, ties
/// broken by registration order (earlier wins) so scheduling stays
/// reproducible. Jobs slated for removal are skipped entirely. The
/// candidate is dispatched only if its credit has reached the action
/// threshold and it is not already running; otherwise surveillance fills
/// the slot.
pub fn select(
    jobs: &[ScanJob],
    credits: &[f64],
    pending_removal: &HashSet<JobId>,
    action_threshold: f64,
) -> Selection {
    debug_assert_eq!(jobs.len(), credits.len());

    let mut best: Option<(usize, f64)> = None;
    for (index, job) in jobs.iter().enumerate() {
        if pending_removal.contains(&job.id) {
            continue;
        }
        let credit = credits[index];
        // Strict comparison keeps the earliest index on ties.
        if best.is_none_or(|(_, best_credit)| credit > best_credit) {
            best = Some((index, credit));
        }
    }

    match best {
        Some((index, credit)) if credit >= action_threshold && !jobs[index].is_running => {
            Selection::Job(index)
        }
        _ => Selection::Surveillance,
    }
}
