use std::time::Instant;

/// One tick of the animation timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the timeline started
    pub elapsed: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// Wall-clock timeline pulled once per display refresh.
///
/// With a limit set the iterator ends once `elapsed` reaches it,
/// which is how `--duration` stops the app.
#[derive(Debug)]
pub struct FrameTimeline {
    frame_number: u64,
    start: Instant,
    last: Instant,
    limit: Option<f32>,
}

impl FrameTimeline {
    pub fn new(limit: Option<f32>) -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start: now,
            last: now,
            limit,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn limit(&self) -> Option<f32> {
        self.limit
    }

    /// Build the next frame from an explicit elapsed time; None past the limit
    fn advance(&mut self, elapsed: f32, delta: f32) -> Option<FrameInfo> {
        if self.limit.is_some_and(|limit| elapsed >= limit) {
            return None;
        }
        let info = FrameInfo {
            number: self.frame_number,
            elapsed,
            delta,
        };
        self.frame_number += 1;
        Some(info)
    }
}

impl Default for FrameTimeline {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Iterator for FrameTimeline {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        let elapsed = now.duration_since(self.start).as_secs_f32();
        self.last = now;
        self.advance(elapsed, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_count_up_and_time_is_monotonic() {
        let mut frames = FrameTimeline::default();
        let a = frames.next().unwrap();
        let b = frames.next().unwrap();
        assert_eq!(a.number, 0);
        assert_eq!(b.number, 1);
        assert!(b.elapsed >= a.elapsed);
        assert!(b.delta >= 0.0);
        assert_eq!(frames.frame_number(), 2);
    }

    #[test]
    fn limit_ends_the_timeline() {
        let mut frames = FrameTimeline::new(Some(2.0));
        assert_eq!(frames.advance(1.99, 0.016).map(|f| f.number), Some(0));
        assert_eq!(frames.advance(2.0, 0.016), None);
        assert_eq!(frames.frame_number(), 1);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let mut frames = FrameTimeline::new(Some(0.0));
        assert!(frames.next().is_none());
    }
}
