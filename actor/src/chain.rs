//! The serialization engine.
//!
//! Pushes register onto a single FIFO queue; one worker task drains it,
//! running each item's callback to completion (asynchronous tail included)
//! before taking the next. Mutual exclusion comes from there being exactly
//! one consumer, so no lock is held while work runs. The registration
//! mutex only covers the counter update, the `is_first` snapshot and the
//! enqueue, which keeps queue order and hint order consistent.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt;
use ordo_config::ActorConfig;
use ordo_types::{ActorError, CancellationToken, ItemHints, WorkItem};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task;
use tracing::Instrument;

use crate::adapter::{self, Work};
use crate::batch;
use crate::builder::OrderedActorBuilder;
use crate::counter::{ActorDiagnostics, PendingCounter};
use crate::handle::{BatchHandle, PushHandle, Reply};

struct Envelope<T, R> {
    value: T,
    cancel: CancellationToken,
    is_first: bool,
    reply: Reply<R>,
}

struct Shared<T, R> {
    queue: Mutex<mpsc::UnboundedSender<Envelope<T, R>>>,
    diagnostics: ActorDiagnostics,
}

/// Runs pushed values through one callback, strictly one at a time and in
/// push order.
///
/// Clones share the same queue and worker. The worker exits once every
/// clone is dropped and the queue has drained; there is no explicit
/// shutdown.
pub struct OrderedActor<T, R> {
    shared: Arc<Shared<T, R>>,
}

impl<T, R> Clone for OrderedActor<T, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, R> fmt::Debug for OrderedActor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedActor")
            .field("name", &self.name())
            .field("scheduled", &self.scheduled_tasks_count())
            .finish_non_exhaustive()
    }
}

impl<T, R> OrderedActor<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Start an actor with default configuration on the current runtime.
    pub fn new(work: Work<T, R>) -> Result<Self, ActorError> {
        OrderedActorBuilder::new().build(work)
    }

    #[must_use]
    pub fn builder() -> OrderedActorBuilder {
        OrderedActorBuilder::new()
    }

    pub fn from_fn<F>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(T) -> R + Send + 'static,
    {
        Self::new(adapter::func(f))
    }

    pub fn from_fn_with_cancel<F>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(T, &CancellationToken) -> R + Send + 'static,
    {
        Self::new(adapter::func_with_cancel(f))
    }

    pub fn with_hints<F>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(WorkItem<T>) -> R + Send + 'static,
    {
        Self::new(adapter::with_hints(f))
    }

    pub fn from_task<F, Fut>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(WorkItem<T>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        Self::new(adapter::task(f))
    }

    pub(crate) fn spawn(config: ActorConfig, runtime: &Handle, work: Work<T, R>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let counter = Arc::new(PendingCounter::default());
        let diagnostics = ActorDiagnostics::new(config.name.as_str(), Arc::clone(&counter));
        let span = tracing::debug_span!("ordered_actor", name = %config.name);
        runtime.spawn(run_worker(rx, work, counter, config).instrument(span));

        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(tx),
                diagnostics,
            }),
        }
    }

    /// Enqueue `value` with a token that is never cancelled.
    pub fn push(&self, value: T) -> PushHandle<R> {
        self.push_with_cancel(value, CancellationToken::new())
    }

    /// Enqueue `value`. Never waits on running work; the handle resolves
    /// once this item's callback has completed.
    ///
    /// Cancelling `cancel` does not remove the item. It still runs in its
    /// slot and the callback decides whether to honour the signal.
    pub fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> PushHandle<R> {
        let (reply, handle) = PushHandle::channel();
        let counter = self.shared.diagnostics.counter();

        let queue = self
            .shared
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let is_first = counter.register();
        let envelope = Envelope {
            value,
            cancel,
            is_first,
            reply,
        };
        let rejected = queue.send(envelope).err();
        drop(queue);

        // The rejected envelope, and with it the caller's value, is dropped
        // only after the lock is released. Its reply going away resolves the
        // handle as closed.
        if let Some(rejected) = rejected {
            counter.rollback();
            tracing::warn!(name = %self.name(), "Push rejected: actor worker has stopped");
            drop(rejected);
        }

        handle
    }

    /// Enqueue each value in order. See [`OrderedActor::push_many_with_cancel`].
    pub fn push_many<I>(&self, values: I) -> BatchHandle<R>
    where
        I: IntoIterator<Item = T>,
    {
        self.push_many_with_cancel(values, &CancellationToken::new())
    }

    /// Enqueue each value in order, stopping as soon as `cancel` is active.
    ///
    /// Values already enqueued are unaffected by a later cancellation and
    /// still run. The joined result therefore holds one entry per enqueued
    /// value and can be shorter than the input.
    pub fn push_many_with_cancel<I>(&self, values: I, cancel: &CancellationToken) -> BatchHandle<R>
    where
        I: IntoIterator<Item = T>,
    {
        batch::enqueue(self, values, cancel)
    }
}

impl<T, R> OrderedActor<T, R> {
    /// Pushes accepted but not yet started.
    #[must_use]
    pub fn scheduled_tasks_count(&self) -> usize {
        self.shared.diagnostics.scheduled_tasks_count()
    }

    /// Pushes accepted but not yet completed.
    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.shared.diagnostics.outstanding_count()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.shared.diagnostics.name()
    }

    /// Read-only view of the counters that does not keep the worker alive.
    #[must_use]
    pub fn diagnostics(&self) -> ActorDiagnostics {
        self.shared.diagnostics.clone()
    }
}

async fn run_worker<T, R>(
    mut queue: mpsc::UnboundedReceiver<Envelope<T, R>>,
    mut work: Work<T, R>,
    counter: Arc<PendingCounter>,
    config: ActorConfig,
) {
    tracing::debug!("Actor worker started");
    while let Some(envelope) = queue.recv().await {
        let Envelope {
            value,
            cancel,
            is_first,
            reply,
        } = envelope;

        let is_last = counter.start();
        tracing::trace!(
            is_first,
            is_last,
            remaining = counter.scheduled(),
            "Running work item"
        );
        let item = WorkItem::new(value, cancel, ItemHints::new(is_first, is_last));

        let outcome = run_captured(&mut work, item).await;
        counter.finish();

        match &outcome {
            Ok(_) => {}
            Err(ActorError::Panicked { message }) => {
                tracing::warn!(panic = %message, "Work item panicked; continuing with next item");
            }
            Err(e) => tracing::debug!(error = %e, "Work item failed"),
        }
        if reply.send(outcome).is_err() {
            tracing::trace!("Result handle dropped before the item completed");
        }

        if config.fair_yield {
            task::yield_now().await;
        }
    }
    tracing::debug!("Actor worker drained");
}

/// Run one callback, converting panics in either its synchronous portion or
/// its asynchronous tail into `ActorError::Panicked`.
async fn run_captured<T, R>(work: &mut Work<T, R>, item: WorkItem<T>) -> Result<R, ActorError> {
    let tail = match panic::catch_unwind(AssertUnwindSafe(|| work(item))) {
        Ok(tail) => tail,
        Err(payload) => return Err(ActorError::from_panic(payload.as_ref())),
    };
    match AssertUnwindSafe(tail).catch_unwind().await {
        Ok(result) => result.map_err(ActorError::Failed),
        Err(payload) => Err(ActorError::from_panic(payload.as_ref())),
    }
}
