use crate::domain::overlay::{CircleOverlay, LatLng, RouteOverlay};
use crate::domain::reading::Reading;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub impact: ImpactSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Notify on every tick spent in danger.
    #[default]
    EveryTick,
    /// Notify only when the state flips from safe to danger.
    OnTransition,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorSettings {
    pub tick_interval_secs: u64,
    pub threshold_m: f64,
    pub min_height_m: f64,
    pub max_height_m: f64,
    pub history_len: usize,
    pub notify_policy: NotifyPolicy,
    pub seed: Option<u64>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: 5,
            threshold_m: 2.5,
            min_height_m: 0.5,
            max_height_m: 3.0,
            history_len: 20,
            notify_policy: NotifyPolicy::EveryTick,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImpactSettings {
    pub distance_km: f64,
    pub wave_speed_kmh: f64,
}

impl Default for ImpactSettings {
    fn default() -> Self {
        Self {
            distance_km: 5.0,
            wave_speed_kmh: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapSettings {
    pub center: LatLng,
    pub zoom: u8,
    pub danger_zone: CircleOverlay,
    pub current_position: LatLng,
    pub safe_zone: LatLng,
}

impl MapSettings {
    pub fn evacuation_route(&self) -> RouteOverlay {
        RouteOverlay {
            from: self.current_position,
            to: self.safe_zone,
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: LatLng::new(7.180, 100.620),
            zoom: 13,
            danger_zone: CircleOverlay {
                center: LatLng::new(7.185, 100.625),
                radius_m: 1000.0,
                color: "red".to_string(),
                fill_color: "#f03".to_string(),
                fill_opacity: 0.5,
            },
            current_position: LatLng::new(7.185, 100.625),
            safe_zone: LatLng::new(7.250, 100.650),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedPoint {
    pub time: String,
    pub height: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub len: usize,
    pub seed: Vec<SeedPoint>,
}

impl ChartSettings {
    pub fn seed_readings(&self) -> Vec<Reading> {
        self.seed
            .iter()
            .map(|p| Reading::new(p.time.clone(), p.height))
            .collect()
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            len: 10,
            seed: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DispatchSettings {
    pub queue_capacity: usize,
    pub send_timeout_secs: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 32,
            send_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelegramSettings {
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            bot_token: String::new(),
            chat_id: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeatherSettings {
    pub api_base: String,
    pub api_key: String,
    pub location: LatLng,
    pub units: String,
    pub lang: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.openweathermap.org".to_string(),
            api_key: String::new(),
            location: LatLng::new(7.200, 100.600),
            units: "metric".to_string(),
            lang: "en".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    pub alert_queue_len: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { alert_queue_len: 20 }
    }
}

impl AppConfig {
    /// Reject settings the monitor loop cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let m = &self.monitor;
        if m.tick_interval_secs == 0 {
            anyhow::bail!("monitor.tick_interval_secs must be greater than zero");
        }
        if m.min_height_m < 0.0 || m.min_height_m >= m.max_height_m {
            anyhow::bail!(
                "monitor height range [{}, {}) is empty or negative",
                m.min_height_m,
                m.max_height_m
            );
        }
        if m.threshold_m < m.min_height_m || m.threshold_m > m.max_height_m {
            anyhow::bail!(
                "monitor.threshold_m {} lies outside the height range [{}, {})",
                m.threshold_m,
                m.min_height_m,
                m.max_height_m
            );
        }
        if self.impact.wave_speed_kmh <= 0.0 {
            anyhow::bail!("impact.wave_speed_kmh must be positive");
        }
        let sizes = [
            ("monitor.history_len", m.history_len as u64),
            ("chart.len", self.chart.len as u64),
            ("dispatch.queue_capacity", self.dispatch.queue_capacity as u64),
            ("dispatch.send_timeout_secs", self.dispatch.send_timeout_secs),
            ("dashboard.alert_queue_len", self.dashboard.alert_queue_len as u64),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            anyhow::bail!("{} must be greater than zero", name);
        }
        Ok(())
    }
}

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("WAVE")
        .prefix_separator("_")
        .separator("__")
}

/// Load `config/monitor` (any format the config crate understands) with
/// `WAVE_*` environment overrides, so credentials never live in the file.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder()
        .add_source(config::File::with_name("config/monitor").required(false))
        .add_source(env_source())
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_match_dashboard_constants() {
        let cfg = parse("");
        assert_eq!(cfg.monitor.tick_interval_secs, 5);
        assert_eq!(cfg.monitor.threshold_m, 2.5);
        assert_eq!(cfg.monitor.history_len, 20);
        assert_eq!(cfg.chart.len, 10);
        assert_eq!(cfg.monitor.notify_policy, NotifyPolicy::EveryTick);
        assert_eq!(cfg.map.danger_zone.radius_m, 1000.0);
        assert_eq!(cfg.map.evacuation_route().to, LatLng::new(7.250, 100.650));
        assert!(cfg.telegram.bot_token.is_empty());
        cfg.validate().unwrap();
    }

    #[test]
    fn test_parse_sections() {
        let cfg = parse(
            r#"
            [monitor]
            notify_policy = "on_transition"
            seed = 7

            [chart]
            len = 4
            seed = [
                { time = "10:00", height = 1.0 },
                { time = "10:10", height = 1.2 },
            ]

            [telegram]
            chat_id = "42"
            "#,
        );
        assert_eq!(cfg.monitor.notify_policy, NotifyPolicy::OnTransition);
        assert_eq!(cfg.monitor.seed, Some(7));
        assert_eq!(cfg.monitor.history_len, 20);
        assert_eq!(cfg.chart.len, 4);
        assert_eq!(cfg.chart.seed_readings()[1], Reading::new("10:10", 1.2));
        assert_eq!(cfg.telegram.chat_id, "42");
        assert_eq!(cfg.telegram.api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_environment_overrides_credentials() {
        let vars = [
            ("WAVE_TELEGRAM__BOT_TOKEN", "123:abc"),
            ("WAVE_WEATHER__API_KEY", "secret"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg: AppConfig = builder()
            .add_source(config::File::from_str(
                "[telegram]\nbot_token = \"from-file\"\n",
                config::FileFormat::Toml,
            ))
            .add_source(env_source().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.telegram.bot_token, "123:abc");
        assert_eq!(cfg.weather.api_key, "secret");
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut cfg = parse("");
        cfg.monitor.min_height_m = 3.0;
        assert!(cfg.validate().is_err());

        let mut cfg = parse("");
        cfg.monitor.threshold_m = 4.0;
        assert!(cfg.validate().is_err());

        let mut cfg = parse("");
        cfg.monitor.tick_interval_secs = 0;
        assert!(cfg.validate().is_err());

        let zeroed: [fn(&mut AppConfig); 5] = [
            |c| c.monitor.history_len = 0,
            |c| c.chart.len = 0,
            |c| c.dispatch.queue_capacity = 0,
            |c| c.dispatch.send_timeout_secs = 0,
            |c| c.dashboard.alert_queue_len = 0,
        ];
        for zero in zeroed {
            let mut cfg = parse("");
            zero(&mut cfg);
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().ends_with("must be greater than zero"));
        }
        assert!(parse("").validate().is_ok());
    }
}
