// Map overlay domain models
use serde::{Deserialize, Serialize};

/// Handle returned by the map surface for an overlay it created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleOverlay {
    pub center: LatLng,
    pub radius_m: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOverlay {
    pub from: LatLng,
    pub to: LatLng,
}
