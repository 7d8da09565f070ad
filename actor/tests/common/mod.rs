//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use tokio::sync::{Notify, oneshot};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Append-only log shared between a test and an actor callback.
#[derive(Debug, Clone)]
pub struct Log<E> {
    entries: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> Log<E> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, entry: E) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn snapshot(&self) -> Vec<E> {
        self.entries.lock().unwrap().clone()
    }
}

/// Holds the actor's worker inside one callback until released.
///
/// `entered` resolves once the callback is running, so everything pushed
/// afterwards is known to be queued behind it.
pub struct Gate {
    release: Arc<Notify>,
    entered_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl Gate {
    pub fn new() -> (Arc<Self>, oneshot::Receiver<()>) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let gate = Arc::new(Self {
            release: Arc::new(Notify::new()),
            entered_tx: Mutex::new(Some(entered_tx)),
        });
        (gate, entered_rx)
    }

    /// Called from inside the gated callback.
    pub async fn wait(&self) {
        if let Some(tx) = self.entered_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
        self.release.notified().await;
    }

    pub fn open(&self) {
        self.release.notify_one();
    }
}
