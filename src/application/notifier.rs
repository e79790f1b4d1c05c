// Notifier trait for outbound chat alerts
use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a human-readable message.
    async fn send(&self, message: &str) -> anyhow::Result<()>;
}

/// Fallback used when no chat credentials are configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &str) -> anyhow::Result<()> {
        tracing::info!("Notification (no chat configured): {}", message);
        Ok(())
    }
}
