use crate::core::geometry::Bounds;
use crate::core::timebase::{Frame, Timebase};
use crate::error::ConfigError;

/// Longest phase or cooldown accepted, in frames. Keeps every frame marker
/// far below `Frame::MAX` for any session length.
pub const MAX_PHASE_FRAMES: Frame = u32::MAX as Frame;

/// Everything the scheduler needs, in stage units and seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskParams {
    pub n_stimuli: usize,
    pub t_vis_min: f64,
    pub t_vis_max: f64,
    pub t_vis_target: f64,
    pub t_invis_min: f64,
    pub t_invis_max: f64,
    pub frame_rate: f64,
    pub target_probability: f64,
    pub target_wait_time: f64,
    pub min_distance: f64,
    pub max_placement_attempts: u32,
    /// Full stage rectangle in cm; placement insets it by `min_distance`.
    pub stage: Bounds,
}

impl Default for TaskParams {
    fn default() -> Self {
        Self {
            n_stimuli: 10,
            t_vis_min: 1.0,
            t_vis_max: 5.0,
            t_vis_target: 0.2,
            t_invis_min: 1.0,
            t_invis_max: 5.0,
            frame_rate: 60.0,
            target_probability: 0.2,
            target_wait_time: 5.0,
            min_distance: 10.0,
            max_placement_attempts: 10_000,
            stage: Bounds::centered(80.0, 60.0),
        }
    }
}

impl TaskParams {
    pub fn timebase(&self) -> Timebase {
        Timebase::new(self.frame_rate)
    }

    pub fn target_visible_frames(&self) -> Frame {
        self.timebase().sec_to_frames(self.t_vis_target)
    }

    pub fn target_wait_frames(&self) -> Frame {
        self.timebase().sec_to_frames(self.target_wait_time)
    }

    /// Average number of items on screen, ignoring targets and frame truncation.
    pub fn expected_visible(&self) -> f64 {
        let vis = 0.5 * (self.t_vis_min + self.t_vis_max);
        let invis = 0.5 * (self.t_invis_min + self.t_invis_max);
        if vis + invis <= 0.0 {
            return 0.0;
        }
        self.n_stimuli as f64 * vis / (vis + invis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_stimuli == 0 {
            return Err(ConfigError::NoStimuli);
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::FrameRate(self.frame_rate));
        }
        for (name, value) in [
            ("t_vis_min", self.t_vis_min),
            ("t_vis_max", self.t_vis_max),
            ("t_vis_target", self.t_vis_target),
            ("t_invis_min", self.t_invis_min),
            ("t_invis_max", self.t_invis_max),
            ("target_wait_time", self.target_wait_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeTime { name, value });
            }
            if self.timebase().sec_to_frames(value) > MAX_PHASE_FRAMES {
                return Err(ConfigError::TimeTooLong {
                    name,
                    value,
                    max_frames: MAX_PHASE_FRAMES,
                });
            }
        }
        if self.t_vis_min > self.t_vis_max {
            return Err(ConfigError::InvertedRange {
                name: "t_vis",
                min: self.t_vis_min,
                max: self.t_vis_max,
            });
        }
        if self.t_invis_min > self.t_invis_max {
            return Err(ConfigError::InvertedRange {
                name: "t_invis",
                min: self.t_invis_min,
                max: self.t_invis_max,
            });
        }
        // visible_until < invisible_until needs at least one invisible frame.
        if self.timebase().sec_to_frames(self.t_invis_min) < 1 {
            return Err(ConfigError::InvisibleTooShort {
                t_invis_min: self.t_invis_min,
                frame_rate: self.frame_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.target_probability) {
            return Err(ConfigError::Probability(self.target_probability));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(ConfigError::MinDistance(self.min_distance));
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.stage.inset(self.min_distance).is_none() {
            return Err(ConfigError::StageTooSmall {
                width: self.stage.width(),
                height: self.stage.height(),
                min_distance: self.min_distance,
            });
        }
        Ok(())
    }
}
