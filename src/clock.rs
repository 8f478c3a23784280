use instant::{Duration, Instant};

/// Measures the time between frames.
///
/// The delta is capped so a stalled frame (window drag, debugger) does not
/// turn into one huge animation step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: Duration,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self {
            last: Instant::now(),
            max_dt,
            frames: 0,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).min(self.max_dt);
        self.last = now;
        self.frames += 1;
        dt.as_secs_f32()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
