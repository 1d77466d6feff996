use web_time::{Duration, Instant};

/// Measures per-frame delta time for the camera controller.
///
/// Deltas are clamped so a stalled frame (window drag, debugger pause)
/// does not fling the camera through inertia.
pub struct FrameClock {
    /// Last tick timestamp
    last_tick: Instant,
    /// Upper bound on a single delta
    max_delta: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f64,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f64,
}

impl FrameClock {
    /// Longest delta reported by default.
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

    /// Create a clock starting now.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_delta(Self::DEFAULT_MAX_DELTA)
    }

    /// Create a clock with a custom delta clamp.
    #[must_use]
    pub fn with_max_delta(max_delta: Duration) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance the clock and return the elapsed seconds since the previous
    /// tick, clamped to the configured maximum.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> f64 {
        let frame_time = elapsed.min(self.max_delta).as_secs_f64();
        let raw = elapsed.as_secs_f64();
        if raw > 0.0 {
            let instant_fps = 1.0 / raw;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_long_frames() {
        let mut clock = FrameClock::with_max_delta(Duration::from_millis(50));
        let dt = clock.record(Duration::from_secs(2));
        assert!((dt - 0.05).abs() < 1e-12);
    }

    #[test]
    fn smooths_fps() {
        let mut clock = FrameClock::new();
        for _ in 0..500 {
            let _ = clock.record(Duration::from_millis(20));
        }
        assert!((clock.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn tick_is_non_negative() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        assert!((0.0..=0.1).contains(&dt));
    }
}
