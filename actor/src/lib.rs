//! Ordered actor: accepts work from any number of concurrent callers and
//! runs it one item at a time, in push order.
//!
//! Each push returns immediately with a handle. The actor's single worker
//! task runs the callback for one item, waits for any asynchronous tail the
//! callback returned, delivers the outcome to that item's handle, then moves
//! on. A failing or panicking item only affects its own handle.
//!
//! ```
//! use ordo_actor::OrderedActor;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let actor = OrderedActor::from_fn(|n: u32| n * 2)?;
//! let first = actor.push(1);
//! let second = actor.push(2);
//! assert_eq!(first.await?, 2);
//! assert_eq!(second.await?, 4);
//! assert_eq!(actor.push_many([3, 4]).await?, vec![6, 8]);
//! # Ok(())
//! # }
//! ```
//!
//! There is no timeout: an item whose future never completes stalls every
//! item queued behind it.

pub mod adapter;

mod action;
mod batch;
mod builder;
mod chain;
mod contract;
mod counter;
mod handle;

pub use action::OrderedActionActor;
pub use adapter::{Work, WorkFuture};
pub use builder::OrderedActorBuilder;
pub use chain::OrderedActor;
pub use contract::{Actor, Completion, TypedActor};
pub use counter::ActorDiagnostics;
pub use handle::{BatchHandle, PushHandle};

pub use ordo_config::ActorConfig;
pub use ordo_types::{ActorError, CancellationToken, ItemHints, Sentinel, WorkItem};
