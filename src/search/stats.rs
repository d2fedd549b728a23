use crate::core::timebase::Frame;

/// Running tally of what a session showed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityStats {
    pub frames: Frame,
    pub visible_item_frames: u64,
    pub max_visible: usize,
    pub targets: u64,
    pub target_frames: u64,
}

impl VisibilityStats {
    pub fn record_frame(&mut self, visible: usize, target_visible: bool) {
        self.frames += 1;
        self.visible_item_frames += visible as u64;
        self.max_visible = self.max_visible.max(visible);
        if target_visible {
            self.target_frames += 1;
        }
    }

    pub fn record_target(&mut self) {
        self.targets += 1;
    }

    pub fn mean_visible(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.visible_item_frames as f64 / self.frames as f64
    }
}
