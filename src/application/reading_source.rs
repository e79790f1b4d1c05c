// Reading sources and wall clock for the monitor loop
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Produces the next wave height in meters.
pub trait ReadingSource: Send {
    fn next_height(&mut self) -> f64;
}

/// Produces the minute-resolution label for a new reading.
pub trait Clock: Send {
    fn label(&self) -> String;
}

/// Simulated sensor: uniform over whole hundredths in `[min, max)`.
pub struct RandomWaveSource {
    rng: StdRng,
    min_cm: u32,
    max_cm: u32,
}

impl RandomWaveSource {
    pub fn new(min_m: f64, max_m: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let min_cm = (min_m * 100.0).round().max(0.0) as u32;
        let max_cm = ((max_m * 100.0).round() as u32).max(min_cm + 1);
        Self {
            rng,
            min_cm,
            max_cm,
        }
    }
}

impl ReadingSource for RandomWaveSource {
    fn next_height(&mut self) -> f64 {
        self.rng.gen_range(self.min_cm..self.max_cm) as f64 / 100.0
    }
}

/// Local wall-clock time as "HH:MM".
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn label(&self) -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }
}
