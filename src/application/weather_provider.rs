// Weather provider trait for the startup snapshot
use crate::domain::weather::WeatherSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at the configured location.
    async fn current(&self) -> anyhow::Result<WeatherSnapshot>;
}
