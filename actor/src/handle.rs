//! Futures handed back to pushers.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::{JoinAll, join_all};
use ordo_types::ActorError;
use tokio::sync::oneshot;

pub(crate) type Reply<R> = oneshot::Sender<Result<R, ActorError>>;

/// Resolves once the pushed item's callback, including its asynchronous
/// tail, has completed.
///
/// Dropping the handle does not cancel the item; it still runs in order.
#[must_use = "the item runs regardless, but its outcome is only observable through the handle"]
#[derive(Debug)]
pub struct PushHandle<R> {
    rx: oneshot::Receiver<Result<R, ActorError>>,
}

impl<R> PushHandle<R> {
    pub(crate) fn channel() -> (Reply<R>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }
}

impl<R> Future for PushHandle<R> {
    type Output = Result<R, ActorError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(ActorError::Closed)))
    }
}

/// Joined outcome of a batch push.
///
/// Waits for every enqueued item. On success yields results in push order;
/// the output is shorter than the input when cancellation stopped the batch
/// early. When several items fail, the failure of the earliest item in push
/// order is returned.
#[must_use = "the items run regardless, but their outcome is only observable through the handle"]
pub struct BatchHandle<R> {
    inner: Pin<Box<JoinAll<PushHandle<R>>>>,
}

impl<R> BatchHandle<R> {
    pub(crate) fn new(handles: Vec<PushHandle<R>>) -> Self {
        Self {
            inner: Box::pin(join_all(handles)),
        }
    }
}

impl<R> Future for BatchHandle<R> {
    type Output = Result<Vec<R>, ActorError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx).map(collect_in_push_order)
    }
}

fn collect_in_push_order<R>(outcomes: Vec<Result<R, ActorError>>) -> Result<Vec<R>, ActorError> {
    let mut results = Vec::with_capacity(outcomes.len());
    let mut first_failure = None;
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(value) => results.push(value),
            Err(e) if first_failure.is_none() => first_failure = Some(e),
            Err(e) => tracing::debug!(index, error = %e, "Additional batch item failed"),
        }
    }
    match first_failure {
        Some(e) => Err(e),
        None => Ok(results),
    }
}
