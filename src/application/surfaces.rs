// Collaborator traits the monitor loop drives
use crate::domain::overlay::{CircleOverlay, OverlayId, RouteOverlay};
use crate::domain::reading::{Reading, SafetyState};
use serde::Serialize;

/// Named text fields on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayField {
    WaveHeight,
    Status,
    ImpactTime,
    Temp,
    Weather,
    WindSpeed,
    WindDir,
    WaveSource,
    WeatherSource,
}

pub trait MapSurface: Send + Sync {
    fn add_circle(&self, circle: &CircleOverlay) -> OverlayId;
    fn add_route(&self, route: &RouteOverlay) -> OverlayId;
    fn remove_overlay(&self, id: OverlayId);
}

pub trait ChartSurface: Send + Sync {
    /// Redraw from the current series. `labels` and `values` are equal length.
    fn update(&self, labels: Vec<String>, values: Vec<f64>);
}

pub trait DisplaySurface: Send + Sync {
    fn set_text(&self, field: DisplayField, text: String);
    /// Status text and css class together.
    fn set_status(&self, state: SafetyState);
    /// Replace the whole history table with `rows`, oldest first.
    fn render_history(&self, rows: &[Reading]);
}

pub trait AlarmSurface: Send + Sync {
    /// Start the siren; a no-op if already playing.
    fn play(&self);
    /// Pause and rewind to the start.
    fn stop(&self);
}

/// Non-blocking user-facing alert queue.
pub trait AlertSurface: Send + Sync {
    fn push_alert(&self, message: String);
}

/// Groups one tick's writes so readers see either all of them or none.
pub trait FrameSurface: Send + Sync {
    fn begin_frame(&self);
    fn commit_frame(&self);
}
