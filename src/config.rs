use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::geometry::Bounds;
use crate::error::ConfigError;
use crate::search::params::TaskParams;

/// Screen scale used when the display has no physical calibration.
pub const FALLBACK_PX_PER_CM: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimuliConfig {
    #[serde(default = "StimuliConfig::default_n_stimuli")]
    pub n_stimuli: usize,
}

impl StimuliConfig {
    fn default_n_stimuli() -> usize {
        10
    }
}

impl Default for StimuliConfig {
    fn default() -> Self {
        Self {
            n_stimuli: Self::default_n_stimuli(),
        }
    }
}

/// Durations in seconds, converted to whole frames at `frame_rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "TimingConfig::default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default = "TimingConfig::default_t_vis_min")]
    pub t_vis_min: f64,
    #[serde(default = "TimingConfig::default_t_vis_max")]
    pub t_vis_max: f64,
    #[serde(default = "TimingConfig::default_t_vis_target")]
    pub t_vis_target: f64,
    #[serde(default = "TimingConfig::default_t_invis_min")]
    pub t_invis_min: f64,
    #[serde(default = "TimingConfig::default_t_invis_max")]
    pub t_invis_max: f64,
}

impl TimingConfig {
    fn default_frame_rate() -> f64 {
        60.0
    }
    fn default_t_vis_min() -> f64 {
        1.0
    }
    fn default_t_vis_max() -> f64 {
        5.0
    }
    fn default_t_vis_target() -> f64 {
        0.2
    }
    fn default_t_invis_min() -> f64 {
        1.0
    }
    fn default_t_invis_max() -> f64 {
        5.0
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_rate: Self::default_frame_rate(),
            t_vis_min: Self::default_t_vis_min(),
            t_vis_max: Self::default_t_vis_max(),
            t_vis_target: Self::default_t_vis_target(),
            t_invis_min: Self::default_t_invis_min(),
            t_invis_max: Self::default_t_invis_max(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "TargetConfig::default_probability")]
    pub probability: f64,
    #[serde(default = "TargetConfig::default_wait_time")]
    pub wait_time: f64,
}

impl TargetConfig {
    fn default_probability() -> f64 {
        0.2
    }
    fn default_wait_time() -> f64 {
        5.0
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            probability: Self::default_probability(),
            wait_time: Self::default_wait_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Minimum distance between item centres, cm.
    #[serde(default = "PlacementConfig::default_min_distance")]
    pub min_distance: f64,
    #[serde(default = "PlacementConfig::default_max_attempts")]
    pub max_attempts: u32,
}

impl PlacementConfig {
    fn default_min_distance() -> f64 {
        10.0
    }
    fn default_max_attempts() -> u32 {
        10_000
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_distance: Self::default_min_distance(),
            max_attempts: Self::default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_width_px")]
    pub width_px: u32,
    #[serde(default = "DisplayConfig::default_height_px")]
    pub height_px: u32,
    #[serde(default)]
    pub fullscreen: bool,
    /// Physical width of the monitor, cm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_width_cm: Option<f64>,
    /// Horizontal resolution of the monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_width_px: Option<u32>,
    #[serde(default = "DisplayConfig::default_preview_secs")]
    pub preview_secs: f64,
}

impl DisplayConfig {
    fn default_width_px() -> u32 {
        800
    }
    fn default_height_px() -> u32 {
        600
    }
    fn default_preview_secs() -> f64 {
        3.0
    }

    /// Returns pixels per cm and whether it came from a real calibration.
    /// A missing or broken calibration is not fatal.
    pub fn px_per_cm(&self) -> (f64, bool) {
        match (self.screen_width_cm, self.screen_width_px) {
            (Some(cm), Some(px)) if cm > 0.0 && cm.is_finite() && px > 0 => {
                (px as f64 / cm, true)
            }
            _ => {
                warn!(
                    fallback = FALLBACK_PX_PER_CM,
                    "screen is not calibrated (set display.screen_width_cm and display.screen_width_px); using fallback px/cm"
                );
                (FALLBACK_PX_PER_CM, false)
            }
        }
    }

    /// Window extent in cm, centred on the origin.
    pub fn stage(&self) -> Bounds {
        let (px_per_cm, _) = self.px_per_cm();
        Bounds::centered(
            self.width_px as f64 / px_per_cm,
            self.height_px as f64 / px_per_cm,
        )
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width_px: Self::default_width_px(),
            height_px: Self::default_height_px(),
            fullscreen: false,
            screen_width_cm: None,
            screen_width_px: None,
            preview_secs: Self::default_preview_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Fixed seed for replay; a fresh one is drawn (and logged) when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub stimuli: StimuliConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn task_params(&self) -> Result<TaskParams, ConfigError> {
        let params = TaskParams {
            n_stimuli: self.stimuli.n_stimuli,
            t_vis_min: self.timing.t_vis_min,
            t_vis_max: self.timing.t_vis_max,
            t_vis_target: self.timing.t_vis_target,
            t_invis_min: self.timing.t_invis_min,
            t_invis_max: self.timing.t_invis_max,
            frame_rate: self.timing.frame_rate,
            target_probability: self.target.probability,
            target_wait_time: self.target.wait_time,
            min_distance: self.placement.min_distance,
            max_placement_attempts: self.placement.max_attempts,
            stage: self.display.stage(),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => {
                        info!(path, "loaded config");
                        return cfg;
                    }
                    Err(err) => {
                        warn!(path, %err, "failed to parse config; using defaults");
                    }
                },
                Err(err) => {
                    warn!(path, %err, "failed to read config; using defaults");
                }
            }
            return Self::default();
        }

        // Missing file: leave a commented-out template behind.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, comment_out(&text)) {
                    warn!(path, %err, "failed to write default config");
                } else {
                    info!(path, "wrote default config template");
                }
            }
            Err(err) => warn!(%err, "failed to serialize default config"),
        }
        default_cfg
    }
}

/// Comments out every key, keeping section headers so the file stays a
/// valid (empty) config.
fn comment_out(text: &str) -> String {
    let mut commented = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            commented.push_str(line);
        } else {
            commented.push_str("# ");
            commented.push_str(trimmed);
        }
        commented.push('\n');
    }
    commented
}
