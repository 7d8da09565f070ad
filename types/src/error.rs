use std::any::Any;

use thiserror::Error;

/// Failure delivered to a push's own result handle.
///
/// A failing item never affects the items queued behind it.
#[derive(Debug, Error)]
pub enum ActorError {
    /// The callback (or its asynchronous tail) returned an error.
    #[error("work item failed: {0:#}")]
    Failed(anyhow::Error),
    /// The callback panicked; the worker caught it and moved on.
    #[error("work item panicked: {message}")]
    Panicked { message: String },
    /// The worker went away before delivering a result.
    #[error("actor worker stopped before the item completed")]
    Closed,
    /// Construction was attempted outside a tokio runtime.
    #[error("no tokio runtime available to host the actor worker")]
    NoRuntime,
}

impl ActorError {
    /// Build a `Panicked` error from a `catch_unwind` payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub fn is_panicked(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
