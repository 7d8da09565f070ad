//! Capability traits callers depend on instead of the concrete engine.
//!
//! [`TypedActor`] keeps the result type; [`Actor`] erases it so actors with
//! different result types can be stored side by side. Anything that
//! implements `TypedActor` with `Send + 'static` handles is an `Actor`.

use std::future::Future;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use ordo_types::{ActorError, CancellationToken, Sentinel};

use crate::action::OrderedActionActor;
use crate::chain::OrderedActor;
use crate::handle::{BatchHandle, PushHandle};

/// Completion of an erased push: success or the item's failure.
pub type Completion = BoxFuture<'static, Result<(), ActorError>>;

/// Submit values to a scheduling policy and observe typed results.
pub trait TypedActor<T> {
    type Output;
    type Handle: Future<Output = Result<Self::Output, ActorError>>;
    type Batch: Future<Output = Result<Vec<Self::Output>, ActorError>>;

    fn push(&self, value: T) -> Self::Handle {
        self.push_with_cancel(value, CancellationToken::new())
    }

    fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> Self::Handle;

    fn push_many(&self, values: Vec<T>) -> Self::Batch {
        self.push_many_with_cancel(values, CancellationToken::new())
    }

    /// May return fewer results than `values` when `cancel` stops the batch.
    fn push_many_with_cancel(&self, values: Vec<T>, cancel: CancellationToken) -> Self::Batch;
}

/// Result-erased form of [`TypedActor`], usable as `dyn Actor<T>`.
pub trait Actor<T> {
    fn push(&self, value: T) -> Completion;

    fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> Completion;

    fn push_many(&self, values: Vec<T>) -> Completion;

    fn push_many_with_cancel(&self, values: Vec<T>, cancel: CancellationToken) -> Completion;
}

impl<T, A> Actor<T> for A
where
    A: TypedActor<T>,
    A::Handle: Send + 'static,
    A::Batch: Send + 'static,
{
    fn push(&self, value: T) -> Completion {
        <A as TypedActor<T>>::push(self, value).map(|r| r.map(drop)).boxed()
    }

    fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> Completion {
        <A as TypedActor<T>>::push_with_cancel(self, value, cancel)
            .map(|r| r.map(drop))
            .boxed()
    }

    fn push_many(&self, values: Vec<T>) -> Completion {
        <A as TypedActor<T>>::push_many(self, values)
            .map(|r| r.map(drop))
            .boxed()
    }

    fn push_many_with_cancel(&self, values: Vec<T>, cancel: CancellationToken) -> Completion {
        <A as TypedActor<T>>::push_many_with_cancel(self, values, cancel)
            .map(|r| r.map(drop))
            .boxed()
    }
}

impl<T, R> TypedActor<T> for OrderedActor<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    type Output = R;
    type Handle = PushHandle<R>;
    type Batch = BatchHandle<R>;

    fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> PushHandle<R> {
        OrderedActor::push_with_cancel(self, value, cancel)
    }

    fn push_many_with_cancel(&self, values: Vec<T>, cancel: CancellationToken) -> BatchHandle<R> {
        OrderedActor::push_many_with_cancel(self, values, &cancel)
    }
}

impl<T> TypedActor<T> for OrderedActionActor<T>
where
    T: Send + 'static,
{
    type Output = Sentinel;
    type Handle = PushHandle<Sentinel>;
    type Batch = BatchHandle<Sentinel>;

    fn push_with_cancel(&self, value: T, cancel: CancellationToken) -> PushHandle<Sentinel> {
        OrderedActionActor::push_with_cancel(self, value, cancel)
    }

    fn push_many_with_cancel(
        &self,
        values: Vec<T>,
        cancel: CancellationToken,
    ) -> BatchHandle<Sentinel> {
        OrderedActionActor::push_many_with_cancel(self, values, &cancel)
    }
}
