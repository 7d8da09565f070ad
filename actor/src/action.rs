//! Actor for callbacks that produce no value.

use std::future::Future;

use ordo_types::{ActorError, CancellationToken, Sentinel, WorkItem};

use crate::adapter::{self, Work};
use crate::chain::OrderedActor;
use crate::counter::ActorDiagnostics;
use crate::handle::{BatchHandle, PushHandle};

/// An [`OrderedActor`] whose callback is side-effecting only.
///
/// Handles resolve to [`Sentinel`], which carries no information beyond
/// completion. Usually consumed through [`crate::Actor`].
#[derive(Debug)]
pub struct OrderedActionActor<T> {
    inner: OrderedActor<T, Sentinel>,
}

impl<T> Clone for OrderedActionActor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> From<OrderedActor<T, Sentinel>> for OrderedActionActor<T> {
    fn from(inner: OrderedActor<T, Sentinel>) -> Self {
        Self { inner }
    }
}

impl<T> OrderedActionActor<T>
where
    T: Send + 'static,
{
    pub fn new(work: Work<T, Sentinel>) -> Result<Self, ActorError> {
        OrderedActor::new(work).map(Self::from)
    }

    pub fn from_action<F>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(T) + Send + 'static,
    {
        Self::new(adapter::action(f))
    }

    pub fn from_action_with_cancel<F>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(T, &CancellationToken) + Send + 'static,
    {
        Self::new(adapter::action_with_cancel(f))
    }

    pub fn with_hints<F>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(WorkItem<T>) + Send + 'static,
    {
        Self::new(adapter::action_with_hints(f))
    }

    pub fn from_task<F, Fut>(f: F) -> Result<Self, ActorError>
    where
        F: FnMut(WorkItem<T>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::new(adapter::task(f))
    }

    pub fn push(&self, value: T) -> PushHandle<Sentinel> {
        self.inner.push(value)
    }

    pub fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> PushHandle<Sentinel> {
        self.inner.push_with_cancel(value, cancel)
    }

    pub fn push_many<I>(&self, values: I) -> BatchHandle<Sentinel>
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.push_many(values)
    }

    pub fn push_many_with_cancel<I>(
        &self,
        values: I,
        cancel: &CancellationToken,
    ) -> BatchHandle<Sentinel>
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.push_many_with_cancel(values, cancel)
    }
}

impl<T> OrderedActionActor<T> {
    #[must_use]
    pub fn scheduled_tasks_count(&self) -> usize {
        self.inner.scheduled_tasks_count()
    }

    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.inner.outstanding_count()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    #[must_use]
    pub fn diagnostics(&self) -> ActorDiagnostics {
        self.inner.diagnostics()
    }
}
