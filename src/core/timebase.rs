/// Display frame index. Frame 0 is the first frame of the search phase.
pub type Frame = u64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timebase {
    pub frame_rate: f64,
}

impl Timebase {
    pub fn new(frame_rate: f64) -> Self {
        Self { frame_rate }
    }

    pub fn frame_to_sec(&self, f: Frame) -> f64 {
        f as f64 / self.frame_rate
    }

    /// Whole frames covered by `s` seconds. Always truncates: a cycle never
    /// gets a partial frame rounded up.
    pub fn sec_to_frames(&self, s: f64) -> Frame {
        if !s.is_finite() || s <= 0.0 {
            return 0;
        }
        (s * self.frame_rate).floor() as Frame
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate)
    }
}
