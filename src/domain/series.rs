// Chart series domain model
use super::reading::Reading;
use super::window::BoundedWindow;

/// Parallel label/value sequences feeding the line chart. Both sequences come
/// from the same window so they can never differ in length.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    points: BoundedWindow<Reading>,
}

impl ChartSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: BoundedWindow::new(capacity),
        }
    }

    /// Start from a set of initial points, keeping only the most recent ones
    /// that fit the bound.
    pub fn with_seed(capacity: usize, seed: impl IntoIterator<Item = Reading>) -> Self {
        let mut series = Self::new(capacity);
        series.points.extend(seed);
        series
    }

    pub fn push(&mut self, reading: Reading) {
        self.points.push(reading);
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|r| r.time.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|r| r.height).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_values_stay_aligned() {
        let mut series = ChartSeries::new(10);
        for i in 0..25 {
            series.push(Reading::new(format!("10:{:02}", i), 1.0 + i as f64 / 100.0));
            assert_eq!(series.labels().len(), series.values().len());
            assert!(series.len() <= 10);
        }
        assert_eq!(series.labels().first().map(String::as_str), Some("10:15"));
        assert_eq!(series.values().last().copied(), Some(1.24));
    }

    #[test]
    fn test_seed_respects_bound() {
        let seed = (0..12).map(|i| Reading::new(format!("09:{:02}", i), 1.0));
        let series = ChartSeries::with_seed(10, seed);
        assert_eq!(series.len(), 10);
        assert_eq!(series.labels()[0], "09:02");
    }
}
