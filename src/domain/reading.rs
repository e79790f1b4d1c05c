// Wave reading and safety state domain models
use serde::Serialize;
use std::fmt;

/// One timestamped wave-height sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Wall-clock label at minute resolution ("HH:MM"), not unique.
    pub time: String,
    /// Height in meters, quantised to hundredths.
    pub height: f64,
}

impl Reading {
    pub fn new(time: impl Into<String>, height: f64) -> Self {
        Self {
            time: time.into(),
            height: quantise(height),
        }
    }

    /// Height as shown on every surface: exactly two decimals.
    pub fn display_height(&self) -> String {
        format!("{:.2}", self.height)
    }
}

/// Round a height to whole hundredths.
pub fn quantise(height: f64) -> f64 {
    (height * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyState {
    Safe,
    Danger,
}

impl SafetyState {
    /// Danger iff the height reaches the threshold.
    pub fn evaluate(height: f64, threshold: f64) -> Self {
        if height >= threshold {
            SafetyState::Danger
        } else {
            SafetyState::Safe
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            SafetyState::Safe => "Status: Safe",
            SafetyState::Danger => "Status: Danger!",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SafetyState::Safe => "safe",
            SafetyState::Danger => "danger",
        }
    }
}

/// Minutes until a high wave reaches the shore, or the "Safe" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactEstimate {
    Minutes(u32),
    Safe,
}

impl ImpactEstimate {
    /// Travel time over a fixed distance at a fixed wave speed. The height
    /// only selects between the estimate and the sentinel.
    pub fn for_state(state: SafetyState, distance_km: f64, wave_speed_kmh: f64) -> Self {
        match state {
            SafetyState::Danger if wave_speed_kmh > 0.0 => {
                let minutes = (distance_km / wave_speed_kmh * 60.0).round();
                ImpactEstimate::Minutes(minutes.max(0.0) as u32)
            }
            SafetyState::Danger => ImpactEstimate::Minutes(0),
            SafetyState::Safe => ImpactEstimate::Safe,
        }
    }
}

impl fmt::Display for ImpactEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactEstimate::Minutes(m) => write!(f, "{}", m),
            ImpactEstimate::Safe => f.write_str("Safe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_height_has_two_decimals() {
        assert_eq!(Reading::new("10:00", 1.8).display_height(), "1.80");
        assert_eq!(Reading::new("10:00", 2.5).display_height(), "2.50");
        assert_eq!(Reading::new("10:00", 0.504).display_height(), "0.50");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(SafetyState::evaluate(2.49, 2.5), SafetyState::Safe);
        assert_eq!(SafetyState::evaluate(2.5, 2.5), SafetyState::Danger);
        assert_eq!(SafetyState::evaluate(2.99, 2.5), SafetyState::Danger);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SafetyState::Safe.status_text(), "Status: Safe");
        assert_eq!(SafetyState::Danger.status_text(), "Status: Danger!");
        assert_eq!(SafetyState::Safe.css_class(), "safe");
        assert_eq!(SafetyState::Danger.css_class(), "danger");
    }

    #[test]
    fn test_impact_estimate() {
        let danger = ImpactEstimate::for_state(SafetyState::Danger, 5.0, 10.0);
        assert_eq!(danger, ImpactEstimate::Minutes(30));
        assert_eq!(danger.to_string(), "30");

        let safe = ImpactEstimate::for_state(SafetyState::Safe, 5.0, 10.0);
        assert_eq!(safe.to_string(), "Safe");
    }
}
