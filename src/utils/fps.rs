/// Frames-per-second estimate averaged over a short window of frames.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    current_fps: f32,
    frame_time: f32,
    delta_time: f32,
    frames: u32,
    timer: f32,
    update_interval: f32,
    has_data: bool,
}

impl FpsCounter {
    pub const DEFAULT_INTERVAL: f32 = 0.25;

    pub fn new() -> Self {
        Self::with_interval(Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(update_interval: f32) -> Self {
        Self {
            current_fps: 0.0,
            frame_time: 0.0,
            delta_time: 0.0,
            frames: 0,
            timer: 0.0,
            update_interval,
            has_data: false,
        }
    }

    /// Records one frame. Returns true when the window closed and a fresh
    /// reading is available.
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.delta_time = delta_time;
        self.timer += delta_time;
        self.frames += 1;

        // A zero interval would otherwise divide by a zero timer.
        if self.timer <= 0.0 || self.timer < self.update_interval {
            return false;
        }

        self.current_fps = self.frames as f32 / self.timer;
        self.frame_time = delta_time * 1000.0;
        self.frames = 0;
        self.timer = 0.0;
        self.has_data = true;
        true
    }

    pub fn current_fps(&self) -> f32 {
        self.current_fps
    }

    /// Duration of the most recent frame in milliseconds.
    pub fn frame_time(&self) -> f32 {
        self.delta_time * 1000.0
    }

    /// Frame time sampled when the last reading was taken, in milliseconds.
    pub fn sampled_frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn summary(&self) -> Option<String> {
        self.has_data.then(|| {
            format!(
                "FPS: {:.1} | Frametime {:.2} ms",
                self.current_fps, self.frame_time
            )
        })
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_reading_before_interval() {
        let mut fps = FpsCounter::new();
        assert!(!fps.update(0.1));
        assert!(!fps.update(0.1));
        assert!(!fps.has_data());
        assert!(fps.summary().is_none());
    }

    #[test]
    fn test_reading_after_interval() {
        let mut fps = FpsCounter::new();
        for _ in 0..3 {
            assert!(!fps.update(0.0625));
        }
        assert!(fps.update(0.0625));
        assert!(fps.has_data());
        assert_relative_eq!(fps.current_fps(), 16.0, epsilon = 1e-3);
        assert_relative_eq!(fps.sampled_frame_time(), 62.5, epsilon = 1e-3);
    }

    #[test]
    fn test_window_restarts_after_reading() {
        let mut fps = FpsCounter::with_interval(1.0);
        assert!(fps.update(1.0));
        assert_relative_eq!(fps.current_fps(), 1.0);

        assert!(!fps.update(0.5));
        assert!(fps.update(0.5));
        assert_relative_eq!(fps.current_fps(), 2.0);
        assert_relative_eq!(fps.frame_time(), 500.0);
    }

    #[test]
    fn test_summary_format() {
        let mut fps = FpsCounter::with_interval(0.0);
        fps.update(0.02);
        assert_eq!(fps.summary().as_deref(), Some("FPS: 50.0 | Frametime 20.00 ms"));
    }

    #[test]
    fn test_zero_interval_ignores_empty_frames() {
        let mut fps = FpsCounter::with_interval(0.0);
        assert!(!fps.update(0.0));
        assert!(!fps.has_data());
        assert!(fps.summary().is_none());

        assert!(fps.update(0.01));
        assert!(fps.current_fps().is_finite());
        assert_relative_eq!(fps.current_fps(), 200.0, epsilon = 1e-2);
    }
}
