// Weather snapshot domain model

const COMPASS: [&str; 8] = [
    "North",
    "Northeast",
    "East",
    "Southeast",
    "South",
    "Southwest",
    "West",
    "Northwest",
];

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub description: String,
    pub wind_speed_ms: f64,
    pub wind_deg: f64,
}

impl WeatherSnapshot {
    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed_ms * 3.6
    }

    pub fn wind_direction(&self) -> &'static str {
        compass_direction(self.wind_deg)
    }
}

/// Bucket a bearing into one of eight 45 degree sectors centred on the
/// cardinal and intercardinal points.
pub fn compass_direction(deg: f64) -> &'static str {
    let sector = (deg / 45.0).round() as i64;
    COMPASS[sector.rem_euclid(8) as usize]
}
