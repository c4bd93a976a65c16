/// Averages frame rate over a fixed window
#[derive(Debug, Clone, Copy)]
pub struct FpsMeter {
    interval: f32,
    accumulator: f32,
    frames: u32,
    fps: f32,
}

impl FpsMeter {
    pub const DEFAULT_INTERVAL: f32 = 1.0;

    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Record one frame; returns true when a new average was published
    pub fn record(&mut self, delta: f32) -> bool {
        self.accumulator += delta;
        self.frames += 1;

        if self.accumulator >= self.interval {
            self.fps = self.frames as f32 / self.accumulator;
            self.accumulator = 0.0;
            self.frames = 0;
            true
        } else {
            false
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_time_ms(&self) -> f32 {
        if self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            0.0
        }
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
