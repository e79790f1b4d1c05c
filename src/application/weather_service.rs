// Weather service - One-shot snapshot published to the display
use crate::application::surfaces::{DisplayField, DisplaySurface};
use crate::application::weather_provider::WeatherProvider;
use crate::domain::weather::WeatherSnapshot;
use std::sync::Arc;

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    display: Arc<dyn DisplaySurface>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, display: Arc<dyn DisplaySurface>) -> Self {
        Self { provider, display }
    }

    /// Fetch current conditions and publish them. Failures are logged and
    /// leave the display untouched.
    pub async fn refresh(&self) -> Option<WeatherSnapshot> {
        match self.provider.current().await {
            Ok(snapshot) => {
                self.publish(&snapshot);
                tracing::info!(
                    "Weather: {:.1} C, {}, wind {:.1} km/h {}",
                    snapshot.temperature_c,
                    snapshot.description,
                    snapshot.wind_speed_kmh(),
                    snapshot.wind_direction()
                );
                Some(snapshot)
            }
            Err(e) => {
                tracing::error!("Error fetching weather data: {:#}", e);
                None
            }
        }
    }

    fn publish(&self, snapshot: &WeatherSnapshot) {
        self.display
            .set_text(DisplayField::Temp, format!("{:.1}", snapshot.temperature_c));
        self.display
            .set_text(DisplayField::Weather, snapshot.description.clone());
        self.display.set_text(
            DisplayField::WindSpeed,
            format!("{:.1}", snapshot.wind_speed_kmh()),
        );
        self.display.set_text(
            DisplayField::WindDir,
            snapshot.wind_direction().to_string(),
        );
    }
}
