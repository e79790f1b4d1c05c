// OpenWeatherMap client - Current conditions for a fixed location
use crate::application::weather_provider::WeatherProvider;
use crate::domain::overlay::LatLng;
use crate::domain::weather::WeatherSnapshot;
use crate::infrastructure::api_error::{ApiError, check_status};
use crate::infrastructure::config::WeatherSettings;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    location: LatLng,
    units: String,
    lang: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

impl CurrentWeatherResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, ApiError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse("weather[0] missing".to_string()))?;
        Ok(WeatherSnapshot {
            temperature_c: self.main.temp,
            description: condition.description,
            wind_speed_ms: self.wind.speed,
            wind_deg: self.wind.deg,
        })
    }
}

impl OpenWeatherClient {
    pub fn new(client: reqwest::Client, settings: &WeatherSettings) -> Self {
        Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            location: settings.location,
            units: settings.units.clone(),
            lang: settings.lang.clone(),
        }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/data/2.5/weather?lat={}&lon={}&units={}&lang={}&appid={}",
            self.api_base,
            self.location.lat,
            self.location.lon,
            urlencoding::encode(&self.units),
            urlencoding::encode(&self.lang),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn fetch(&self) -> Result<WeatherSnapshot, ApiError> {
        let response = self.client.get(self.build_url()).send().await?;
        let response = check_status(response).await?;
        let body = response.json::<CurrentWeatherResponse>().await?;
        body.into_snapshot()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self) -> anyhow::Result<WeatherSnapshot> {
        self.fetch()
            .await
            .context("Failed to fetch weather from OpenWeatherMap")
    }
}
