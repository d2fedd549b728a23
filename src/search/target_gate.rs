use rand::Rng;

use crate::core::timebase::Frame;

/// Cooldown between target onsets.
///
/// Each expiring slot rolls on its own; the gate only remembers the first
/// frame after which another target may start.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetGate {
    probability: f64,
    wait_frames: Frame,
    next_allowed: Frame,
}

impl TargetGate {
    pub fn new(probability: f64, wait_frames: Frame) -> Self {
        Self {
            probability,
            wait_frames,
            next_allowed: 0,
        }
    }

    pub fn next_allowed(&self) -> Frame {
        self.next_allowed
    }

    /// Always consumes one draw, even while the cooldown is running.
    pub fn may_become_target<R: Rng + ?Sized>(&self, frame: Frame, rng: &mut R) -> bool {
        let roll = rng.random::<f64>();
        roll < self.probability && frame > self.next_allowed
    }

    /// Called when a target cycle ending at `invisible_until` was started.
    pub fn record_target(&mut self, invisible_until: Frame) {
        self.next_allowed = invisible_until.saturating_add(self.wait_frames);
    }
}
