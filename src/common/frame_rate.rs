use std::time::Duration;

/// Counts presented frames and reports the average rate once per window.
#[derive(Debug, Clone)]
pub struct FrameRateCounter {
    window: Duration,
    elapsed: Duration,
    frames: u32,
}

impl FrameRateCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    /// Records one frame that took `delta`. Returns frames per second once the
    /// report window has elapsed, then starts a new window.
    pub fn record(&mut self, delta: Duration) -> Option<f64> {
        self.frames += 1;
        self.elapsed += delta;
        if self.elapsed < self.window {
            return None;
        }

        let fps = f64::from(self.frames) / self.elapsed.as_secs_f64();
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(fps)
    }
}

impl Default for FrameRateCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
