// Wave monitor - Periodic reading, bounded history and threshold alerts
use crate::application::dispatcher::NotificationDispatcher;
use crate::application::reading_source::{Clock, ReadingSource};
use crate::application::surfaces::{
    AlarmSurface, AlertSurface, ChartSurface, DisplayField, DisplaySurface, FrameSurface,
    MapSurface,
};
use crate::domain::overlay::{CircleOverlay, OverlayId, RouteOverlay};
use crate::domain::reading::{ImpactEstimate, Reading, SafetyState};
use crate::domain::series::ChartSeries;
use crate::domain::window::BoundedWindow;
use crate::infrastructure::config::{AppConfig, NotifyPolicy};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

pub const CAUTION_MESSAGE: &str = "High wave level detected! Please be cautious.";

pub fn notification_message(reading: &Reading) -> String {
    format!(
        "Alert: High wave level detected! Current height: {} meters.",
        reading.display_height()
    )
}

/// Everything the monitor needs to talk to.
#[derive(Clone)]
pub struct Surfaces {
    pub map: Arc<dyn MapSurface>,
    pub chart: Arc<dyn ChartSurface>,
    pub display: Arc<dyn DisplaySurface>,
    pub alarm: Arc<dyn AlarmSurface>,
    pub alerts: Arc<dyn AlertSurface>,
    pub frame: Arc<dyn FrameSurface>,
}

/// Fixed parameters of the loop, taken from configuration.
#[derive(Debug, Clone)]
pub struct MonitorParams {
    pub interval: Duration,
    pub threshold_m: f64,
    pub notify_policy: NotifyPolicy,
    pub history_len: usize,
    pub chart_len: usize,
    pub chart_seed: Vec<Reading>,
    pub distance_km: f64,
    pub wave_speed_kmh: f64,
    pub danger_zone: CircleOverlay,
    pub evacuation_route: RouteOverlay,
}

impl MonitorParams {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            interval: Duration::from_secs(cfg.monitor.tick_interval_secs),
            threshold_m: cfg.monitor.threshold_m,
            notify_policy: cfg.monitor.notify_policy,
            history_len: cfg.monitor.history_len,
            chart_len: cfg.chart.len,
            chart_seed: cfg.chart.seed_readings(),
            distance_km: cfg.impact.distance_km,
            wave_speed_kmh: cfg.impact.wave_speed_kmh,
            danger_zone: cfg.map.danger_zone.clone(),
            evacuation_route: cfg.map.evacuation_route(),
        }
    }
}

/// Optional map overlay handle with idempotent create/remove.
#[derive(Debug, Default)]
pub struct OverlaySlot {
    id: Option<OverlayId>,
}

impl OverlaySlot {
    /// Create via `create` only when nothing is held. Returns true if created.
    pub fn ensure(&mut self, create: impl FnOnce() -> OverlayId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(create());
        true
    }

    /// Remove the held overlay, if any. Returns true if one was removed.
    pub fn clear(&mut self, map: &dyn MapSurface) -> bool {
        match self.id.take() {
            Some(id) => {
                map.remove_overlay(id);
                true
            }
            None => false,
        }
    }

    pub fn id(&self) -> Option<OverlayId> {
        self.id
    }
}

/// State owned by the loop; nothing else writes it.
#[derive(Debug)]
pub struct MonitorState {
    pub state: SafetyState,
    pub history: BoundedWindow<Reading>,
    pub series: ChartSeries,
    pub danger_zone: OverlaySlot,
    pub evacuation_route: OverlaySlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub reading: Reading,
    pub state: SafetyState,
    pub transitioned: bool,
    pub notified: bool,
}

pub struct WaveMonitor {
    params: MonitorParams,
    surfaces: Surfaces,
    dispatcher: NotificationDispatcher,
    source: Box<dyn ReadingSource>,
    clock: Box<dyn Clock>,
    state: MonitorState,
}

impl WaveMonitor {
    pub fn new(
        params: MonitorParams,
        surfaces: Surfaces,
        dispatcher: NotificationDispatcher,
        source: Box<dyn ReadingSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let state = MonitorState {
            state: SafetyState::Safe,
            history: BoundedWindow::new(params.history_len),
            series: ChartSeries::with_seed(params.chart_len, params.chart_seed.iter().cloned()),
            danger_zone: OverlaySlot::default(),
            evacuation_route: OverlaySlot::default(),
        };
        surfaces
            .chart
            .update(state.series.labels(), state.series.values());
        Self {
            params,
            surfaces,
            dispatcher,
            source,
            clock,
            state,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Take one reading from the source and process it.
    pub fn tick(&mut self) -> TickOutcome {
        let height = self.source.next_height();
        let time = self.clock.label();
        self.record(Reading::new(time, height))
    }

    /// Process one reading and drive every surface from it.
    pub fn record(&mut self, reading: Reading) -> TickOutcome {
        let previous = self.state.state;
        let state = SafetyState::evaluate(reading.height, self.params.threshold_m);
        let transitioned = previous != state;

        self.surfaces.frame.begin_frame();
        self.state.series.push(reading.clone());

        self.surfaces
            .display
            .set_text(DisplayField::WaveHeight, reading.display_height());

        self.state.state = state;
        let notified = match state {
            SafetyState::Danger => self.enter_danger(&reading, transitioned),
            SafetyState::Safe => {
                self.enter_safe();
                false
            }
        };

        self.surfaces
            .chart
            .update(self.state.series.labels(), self.state.series.values());

        self.state.history.push(reading.clone());

        let impact =
            ImpactEstimate::for_state(state, self.params.distance_km, self.params.wave_speed_kmh);
        self.surfaces
            .display
            .set_text(DisplayField::ImpactTime, impact.to_string());

        self.surfaces
            .display
            .render_history(&self.state.history.to_vec());
        self.surfaces.frame.commit_frame();

        if transitioned {
            tracing::info!(
                "Wave state {:?} -> {:?} at {} ({} m)",
                previous,
                state,
                reading.time,
                reading.display_height()
            );
        } else {
            tracing::debug!(
                "Wave reading {} m at {}, state {:?}, history {}/{}, chart {}",
                reading.display_height(),
                reading.time,
                state,
                self.state.history.len(),
                self.state.history.capacity(),
                self.state.series.len()
            );
        }

        TickOutcome {
            reading,
            state,
            transitioned,
            notified,
        }
    }

    fn enter_danger(&mut self, reading: &Reading, transitioned: bool) -> bool {
        let surfaces = &self.surfaces;
        surfaces.display.set_status(SafetyState::Danger);
        surfaces.alarm.play();

        let zone = &self.params.danger_zone;
        if self
            .state
            .danger_zone
            .ensure(|| surfaces.map.add_circle(zone))
        {
            tracing::debug!(
                "Danger zone overlay {:?} created",
                self.state.danger_zone.id()
            );
        }

        surfaces.alerts.push_alert(CAUTION_MESSAGE.to_string());

        let notify = match self.params.notify_policy {
            NotifyPolicy::EveryTick => true,
            NotifyPolicy::OnTransition => transitioned,
        };
        let notified = notify && self.dispatcher.dispatch(notification_message(reading));

        let route = &self.params.evacuation_route;
        if self
            .state
            .evacuation_route
            .ensure(|| surfaces.map.add_route(route))
        {
            tracing::debug!(
                "Evacuation route overlay {:?} created",
                self.state.evacuation_route.id()
            );
        }

        notified
    }

    fn enter_safe(&mut self) {
        let surfaces = &self.surfaces;
        surfaces.display.set_status(SafetyState::Safe);
        surfaces.alarm.stop();
        if self.state.danger_zone.clear(surfaces.map.as_ref()) {
            tracing::debug!("Danger zone overlay removed");
        }
        if self.state.evacuation_route.clear(surfaces.map.as_ref()) {
            tracing::debug!("Evacuation route overlay removed");
        }
    }

    /// Tick on the configured period until `shutdown` resolves. The first
    /// reading is taken one full period after start.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        let start = tokio::time::Instant::now() + self.params.interval;
        let mut interval = tokio::time::interval_at(start, self.params.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(interval);

        tracing::info!(
            "Wave monitor started, ticking every {:?}",
            self.params.interval
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                tick = ticks.next() => {
                    if tick.is_none() {
                        break;
                    }
                    self.tick();
                }
            }
        }

        tracing::info!("Wave monitor stopped");
    }
}
