//! Core domain types for ordered actors.
//!
//! This crate contains pure domain types with no IO and no runtime. The
//! engine in `ordo-actor` produces and consumes them; callers see them in
//! callback signatures and result handles.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod error;

pub use error::ActorError;
pub use tokio_util::sync::CancellationToken;

/// Result type of actors whose callbacks produce nothing.
///
/// Carries no meaning for the caller; it lets one engine serve both the
/// value-producing and the side-effecting actor shapes.
pub type Sentinel = ();

// ============================================================================
// Item hints
// ============================================================================

/// Best-effort position hints attached to every work item.
///
/// Neither flag is a guarantee. Pushes racing with the snapshot can make
/// either one stale by the time the callback observes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemHints {
    is_first: bool,
    is_last: bool,
}

impl ItemHints {
    #[must_use]
    pub const fn new(is_first: bool, is_last: bool) -> Self {
        Self { is_first, is_last }
    }

    /// No earlier push was still outstanding when this item was registered.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.is_first
    }

    /// No later push was waiting when this item's callback started.
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.is_last
    }
}

// ============================================================================
// Work item
// ============================================================================

/// One accepted push, as handed to the canonical callback.
///
/// Created per push and consumed by exactly one callback invocation.
#[derive(Debug)]
pub struct WorkItem<T> {
    value: T,
    cancel: CancellationToken,
    hints: ItemHints,
}

impl<T> WorkItem<T> {
    #[must_use]
    pub fn new(value: T, cancel: CancellationToken, hints: ItemHints) -> Self {
        Self {
            value,
            cancel,
            hints,
        }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Cooperative cancellation signal supplied with the push.
    ///
    /// Cancellation never removes the item from the queue; the callback
    /// decides whether to honour it.
    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[must_use]
    pub fn hints(&self) -> ItemHints {
        self.hints
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.hints.is_first()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.hints.is_last()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Split into value, token and hints.
    #[must_use]
    pub fn into_parts(self) -> (T, CancellationToken, ItemHints) {
        (self.value, self.cancel, self.hints)
    }

    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}
