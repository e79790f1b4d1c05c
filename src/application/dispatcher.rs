// Notification dispatcher - Bounded fire-and-forget delivery queue
use crate::application::notifier::Notifier;
use crate::infrastructure::api_error::ApiError;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Counters {
    pending: AtomicUsize,
    delivered: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    /// Queued or currently being delivered.
    pub pending: usize,
    pub delivered: u64,
    pub failed: u64,
    /// Rejected because the queue was full.
    pub dropped: u64,
}

/// Hands messages to a single worker over a bounded channel. Callers never
/// wait for delivery and never see its outcome.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<String>,
    counters: Arc<Counters>,
}

impl NotificationDispatcher {
    /// Start the worker. It exits once every dispatcher clone is dropped and
    /// the queue is drained.
    pub fn spawn(
        notifier: Arc<dyn Notifier>,
        capacity: usize,
        send_timeout: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let counters = Arc::new(Counters::default());
        let worker = tokio::spawn(deliver(notifier, rx, counters.clone(), send_timeout));
        (Self { tx, counters }, worker)
    }

    /// Queue a message. Returns false when it was dropped.
    pub fn dispatch(&self, message: String) -> bool {
        self.counters.pending.fetch_add(1, Ordering::SeqCst);
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(e) => {
                self.counters.pending.fetch_sub(1, Ordering::SeqCst);
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                match e {
                    mpsc::error::TrySendError::Full(_) => {
                        tracing::warn!("Notification queue full, dropping message")
                    }
                    mpsc::error::TrySendError::Closed(_) => {
                        tracing::warn!("Notification worker stopped, dropping message")
                    }
                }
                false
            }
        }
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            pending: self.counters.pending.load(Ordering::SeqCst),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }

    /// Wait until every queued message has been attempted.
    pub async fn wait_idle(&self) {
        while self.counters.pending.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn deliver(
    notifier: Arc<dyn Notifier>,
    mut rx: mpsc::Receiver<String>,
    counters: Arc<Counters>,
    send_timeout: Duration,
) {
    while let Some(message) = rx.recv().await {
        match tokio::time::timeout(send_timeout, notifier.send(&message)).await {
            Ok(Ok(())) => {
                counters.delivered.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Err(e)) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!("Error sending notification: {:#}", e);
            }
            Err(_) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    "Error sending notification: {} after {:?}",
                    ApiError::Timeout,
                    send_timeout
                );
            }
        }
        counters.pending.fetch_sub(1, Ordering::SeqCst);
    }
    tracing::debug!("Notification worker stopped");
}
