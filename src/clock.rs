/// Time source for animated evaluations.
///
/// Advances by a fixed step and wraps back to zero once the time runs past
/// the period. Only the time sequence lives here; driving it is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    time: f64,
    step: f64,
    period: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(0.1, 10.0)
    }
}

impl SimulationClock {
    pub fn new(step: f64, period: f64) -> Self {
        Self {
            time: 0.0,
            step,
            period,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Move one step forward and return the new time
    pub fn advance(&mut self) -> f64 {
        let next = self.time + self.step;
        self.time = if next > self.period { 0.0 } else { next };
        self.time
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// Jump to an arbitrary time, e.g. from a scrub control
    pub fn set(&mut self, time: f64) {
        self.time = time;
    }

    /// The next `count` times this clock would produce, without moving it
    pub fn schedule(&self, count: usize) -> Vec<f64> {
        let mut clock = *self;
        (0..count).map(|_| clock.advance()).collect()
    }
}
