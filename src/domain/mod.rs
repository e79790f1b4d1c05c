// Domain layer - Wave readings, bounded windows, overlays and weather
pub mod overlay;
pub mod reading;
pub mod series;
pub mod weather;
pub mod window;
