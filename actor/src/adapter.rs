//! Callback shapes accepted at construction, normalized into [`Work`].
//!
//! The engine only ever sees the canonical form: a callback taking a
//! [`WorkItem`] and returning a boxed future of `anyhow::Result<R>`. The
//! future is the item's asynchronous tail; the next item does not start
//! until it resolves. Synchronous shapes run their closure inline and
//! return an already-completed future.

use std::future::Future;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use ordo_types::{CancellationToken, Sentinel, WorkItem};

/// Future returned by the canonical callback.
pub type WorkFuture<R> = BoxFuture<'static, anyhow::Result<R>>;

/// The canonical callback consumed by the engine.
///
/// Invoked by a single worker, one item at a time, so `FnMut` state needs
/// no synchronization of its own.
pub type Work<T, R> = Box<dyn FnMut(WorkItem<T>) -> WorkFuture<R> + Send>;

/// Asynchronous, fallible, hint-aware shape. This is the canonical form.
pub fn task<T, R, F, Fut>(mut f: F) -> Work<T, R>
where
    T: Send + 'static,
    F: FnMut(WorkItem<T>) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    Box::new(move |item| f(item).boxed())
}

/// Synchronous, fallible, hint-aware shape.
pub fn fallible<T, R, F>(mut f: F) -> Work<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(WorkItem<T>) -> anyhow::Result<R> + Send + 'static,
{
    Box::new(move |item| future::ready(f(item)).boxed())
}

/// Value-producing shape that receives first/last hints.
pub fn with_hints<T, R, F>(mut f: F) -> Work<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(WorkItem<T>) -> R + Send + 'static,
{
    fallible(move |item| Ok(f(item)))
}

/// Value-producing shape that observes the cancellation signal.
pub fn func_with_cancel<T, R, F>(mut f: F) -> Work<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T, &CancellationToken) -> R + Send + 'static,
{
    with_hints(move |item: WorkItem<T>| {
        let (value, cancel, _) = item.into_parts();
        f(value, &cancel)
    })
}

/// Value-producing shape, unaware of cancellation.
pub fn func<T, R, F>(mut f: F) -> Work<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T) -> R + Send + 'static,
{
    func_with_cancel(move |value, _: &CancellationToken| f(value))
}

/// Side-effecting shape that observes the cancellation signal.
pub fn action_with_cancel<T, F>(f: F) -> Work<T, Sentinel>
where
    T: Send + 'static,
    F: FnMut(T, &CancellationToken) + Send + 'static,
{
    func_with_cancel(f)
}

/// Side-effecting shape, unaware of cancellation.
pub fn action<T, F>(f: F) -> Work<T, Sentinel>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    func(f)
}

/// Side-effecting shape that receives first/last hints.
pub fn action_with_hints<T, F>(f: F) -> Work<T, Sentinel>
where
    T: Send + 'static,
    F: FnMut(WorkItem<T>) + Send + 'static,
{
    with_hints(f)
}
