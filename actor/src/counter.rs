//! Pending-item bookkeeping shared between pushers and the worker.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts pushes that have not started (`scheduled`) and pushes that have
/// not finished (`outstanding`).
///
/// Values are advisory: concurrent pushers race with the worker, so a read
/// may be stale by the time it is used.
#[derive(Debug, Default)]
pub(crate) struct PendingCounter {
    scheduled: AtomicUsize,
    outstanding: AtomicUsize,
}

impl PendingCounter {
    /// Account for an accepted push. Returns whether nothing else was
    /// outstanding, i.e. the `is_first` snapshot.
    pub(crate) fn register(&self) -> bool {
        self.scheduled.fetch_add(1, Ordering::AcqRel);
        self.outstanding.fetch_add(1, Ordering::AcqRel) == 0
    }

    /// Undo [`PendingCounter::register`] for a push the worker never received.
    pub(crate) fn rollback(&self) {
        decrement(&self.scheduled);
        decrement(&self.outstanding);
    }

    /// Called once per item immediately before its callback runs. Returns
    /// whether the queue is now empty, i.e. the `is_last` hint.
    pub(crate) fn start(&self) -> bool {
        decrement(&self.scheduled) == 0
    }

    /// Called once per item after its callback (and async tail) finished.
    pub(crate) fn finish(&self) {
        decrement(&self.outstanding);
    }

    pub(crate) fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::Acquire)
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

/// Read-only view of an actor's counters.
///
/// Holding one does not keep the actor's worker alive, so it can be moved
/// into the actor's own callback.
#[derive(Debug, Clone)]
pub struct ActorDiagnostics {
    name: Arc<str>,
    counter: Arc<PendingCounter>,
}

impl ActorDiagnostics {
    pub(crate) fn new(name: &str, counter: Arc<PendingCounter>) -> Self {
        Self {
            name: Arc::from(name),
            counter,
        }
    }

    pub(crate) fn counter(&self) -> &PendingCounter {
        &self.counter
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pushes accepted but not yet started.
    #[must_use]
    pub fn scheduled_tasks_count(&self) -> usize {
        self.counter.scheduled()
    }

    /// Pushes accepted but not yet completed.
    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.counter.outstanding()
    }
}

/// Saturating decrement; returns the new value.
fn decrement(counter: &AtomicUsize) -> usize {
    match counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1)) {
        Ok(previous) => previous - 1,
        Err(_) => {
            tracing::error!("Pending counter decremented below zero");
            0
        }
    }
}
