// In-memory dashboard view backing every surface the monitor drives
use crate::application::surfaces::{
    AlarmSurface, AlertSurface, ChartSurface, DisplayField, DisplaySurface, FrameSurface,
    MapSurface,
};
use crate::domain::overlay::{CircleOverlay, LatLng, OverlayId, RouteOverlay};
use crate::domain::reading::{Reading, SafetyState};
use crate::domain::window::BoundedWindow;
use crate::infrastructure::config::MapSettings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub time: String,
    pub height: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartView {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayView {
    Circle { id: OverlayId, circle: CircleOverlay },
    Route { id: OverlayId, route: RouteOverlay },
}

impl OverlayView {
    fn id(&self) -> OverlayId {
        match self {
            OverlayView::Circle { id, .. } | OverlayView::Route { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub id: u64,
    pub raised_at: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub marker: LatLng,
}

/// Everything a browser needs to draw the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub fields: BTreeMap<DisplayField, String>,
    pub status_class: String,
    pub history: Vec<HistoryRow>,
    pub chart: ChartView,
    pub overlays: Vec<OverlayView>,
    pub alarm_playing: bool,
    pub alerts: Vec<AlertEntry>,
    pub map: MapView,
}

#[cfg(test)]
impl DashboardSnapshot {
    pub fn field(&self, field: DisplayField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct Inner {
    fields: BTreeMap<DisplayField, String>,
    status_class: String,
    history: Vec<HistoryRow>,
    chart: ChartView,
    overlays: Vec<OverlayView>,
    next_overlay: u64,
    alarm_playing: bool,
    alerts: BoundedWindow<AlertEntry>,
    next_alert: u64,
    map: MapView,
}

/// Readers only ever see `published`. While a frame is open every write
/// lands in `staging`, which replaces `published` on commit.
#[derive(Debug, Clone)]
pub struct DashboardView {
    published: Arc<RwLock<Inner>>,
    staging: Arc<Mutex<Option<Inner>>>,
}

impl DashboardView {
    pub fn new(map: &MapSettings, alert_queue_len: usize) -> Self {
        let inner = Inner {
            fields: BTreeMap::new(),
            status_class: SafetyState::Safe.css_class().to_string(),
            history: Vec::new(),
            chart: ChartView::default(),
            overlays: Vec::new(),
            next_overlay: 1,
            alarm_playing: false,
            alerts: BoundedWindow::new(alert_queue_len),
            next_alert: 1,
            map: MapView {
                center: map.center,
                zoom: map.zoom,
                marker: map.current_position,
            },
        };
        Self {
            published: Arc::new(RwLock::new(inner)),
            staging: Arc::new(Mutex::new(None)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.published.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.published.write().unwrap_or_else(|e| e.into_inner())
    }

    fn staging(&self) -> MutexGuard<'_, Option<Inner>> {
        self.staging.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply one write to the open frame, or straight to the published view.
    /// Lock order is always staging, then published.
    fn apply<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut staging = self.staging();
        match staging.as_mut() {
            Some(frame) => f(frame),
            None => f(&mut self.write()),
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let inner = self.read();
        DashboardSnapshot {
            fields: inner.fields.clone(),
            status_class: inner.status_class.clone(),
            history: inner.history.clone(),
            chart: inner.chart.clone(),
            overlays: inner.overlays.clone(),
            alarm_playing: inner.alarm_playing,
            alerts: inner.alerts.to_vec(),
            map: inner.map.clone(),
        }
    }

    pub fn history(&self) -> Vec<HistoryRow> {
        self.read().history.clone()
    }

    pub fn alerts(&self) -> Vec<AlertEntry> {
        self.read().alerts.to_vec()
    }

    /// Acknowledge every pending alert. Returns how many were cleared.
    pub fn clear_alerts(&self) -> usize {
        self.apply(|inner| {
            if inner.alerts.is_empty() {
                return 0;
            }
            let cleared = inner.alerts.len();
            inner.alerts.clear();
            cleared
        })
    }

    /// Label both data sources shown under the readings.
    pub fn label_sources(&self) {
        self.set_text(
            DisplayField::WaveSource,
            "API: Wave Monitoring System".to_string(),
        );
        self.set_text(DisplayField::WeatherSource, "API: OpenWeatherMap".to_string());
    }

    fn add_overlay(&self, make: impl FnOnce(OverlayId) -> OverlayView) -> OverlayId {
        self.apply(|inner| {
            let id = OverlayId(inner.next_overlay);
            inner.next_overlay += 1;
            inner.overlays.push(make(id));
            id
        })
    }
}

impl FrameSurface for DashboardView {
    fn begin_frame(&self) {
        let mut staging = self.staging();
        if staging.is_none() {
            *staging = Some(self.read().clone());
        }
    }

    fn commit_frame(&self) {
        let mut staging = self.staging();
        if let Some(frame) = staging.take() {
            *self.write() = frame;
        }
    }
}

impl MapSurface for DashboardView {
    fn add_circle(&self, circle: &CircleOverlay) -> OverlayId {
        self.add_overlay(|id| OverlayView::Circle {
            id,
            circle: circle.clone(),
        })
    }

    fn add_route(&self, route: &RouteOverlay) -> OverlayId {
        self.add_overlay(|id| OverlayView::Route {
            id,
            route: route.clone(),
        })
    }

    fn remove_overlay(&self, id: OverlayId) {
        self.apply(|inner| inner.overlays.retain(|o| o.id() != id));
    }
}

impl ChartSurface for DashboardView {
    fn update(&self, labels: Vec<String>, values: Vec<f64>) {
        self.apply(|inner| inner.chart = ChartView { labels, values });
    }
}

impl DisplaySurface for DashboardView {
    fn set_text(&self, field: DisplayField, text: String) {
        self.apply(|inner| {
            inner.fields.insert(field, text);
        });
    }

    fn set_status(&self, state: SafetyState) {
        self.apply(|inner| {
            inner
                .fields
                .insert(DisplayField::Status, state.status_text().to_string());
            inner.status_class = state.css_class().to_string();
        });
    }

    fn render_history(&self, rows: &[Reading]) {
        let rows = rows
            .iter()
            .map(|r| HistoryRow {
                time: r.time.clone(),
                height: r.display_height(),
            })
            .collect();
        self.apply(|inner| inner.history = rows);
    }
}

impl AlarmSurface for DashboardView {
    fn play(&self) {
        self.apply(|inner| inner.alarm_playing = true);
    }

    fn stop(&self) {
        self.apply(|inner| inner.alarm_playing = false);
    }
}

impl AlertSurface for DashboardView {
    fn push_alert(&self, message: String) {
        let raised_at = chrono::Local::now().format("%H:%M:%S").to_string();
        self.apply(|inner| {
            let id = inner.next_alert;
            inner.next_alert += 1;
            inner.alerts.push(AlertEntry {
                id,
                raised_at,
                message,
            });
        });
    }
}
