//! Background persistence writer.
//!
//! Each cart store owns one writer task. Mutations enqueue the serialized
//! cart and return immediately; the task writes snapshots to storage one at a
//! time, in the order they were enqueued, so the durable copy always ends at
//! the latest in-memory state.
//!
//! Every write is attempted exactly once. A failed write is logged and
//! dropped: the next mutation overwrites the whole value anyway.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;

enum Command {
    Write(String),
    Flush(oneshot::Sender<()>),
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(payload) => f.debug_tuple("Write").field(&payload.len()).finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

/// Sending side of a store's writer task.
///
/// The task exits once every sender is dropped and the queue is drained.
#[derive(Debug)]
pub(crate) struct PersistQueue {
    tx: mpsc::UnboundedSender<Command>,
}

impl PersistQueue {
    /// Spawn a writer task that persists snapshots under `key`.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn spawn<S: KeyValueStore>(storage: S, key: &'static str) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();

        debug!(key, "Spawning cart persistence task");
        tokio::spawn(async move {
            let mut written = 0_u64;
            let mut failed = 0_u64;
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Write(payload) => match storage.set(key, &payload).await {
                        Ok(()) => {
                            written += 1;
                            debug!(key, bytes = payload.len(), "Persisted cart");
                        }
                        Err(e) => {
                            failed += 1;
                            warn!(key, error = %e, "Failed to persist cart, dropping write");
                        }
                    },
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            info!(key, written, failed, "Cart persistence task stopped");
        });

        Self { tx }
    }

    /// Queue a full-cart overwrite. Never blocks.
    pub(crate) fn enqueue(&self, payload: String) {
        if self.tx.send(Command::Write(payload)).is_err() {
            warn!("Cart persistence task is gone, dropping write");
        }
    }

    /// Wait until every write queued before this call has been attempted.
    pub(crate) async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}
