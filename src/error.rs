use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("n_stimuli must be at least 1")]
    NoStimuli,
    #[error("frame_rate must be positive and finite, got {0}")]
    FrameRate(f64),
    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeTime { name: &'static str, value: f64 },
    #[error("{name} = {value} s spans more than {max_frames} frames")]
    TimeTooLong {
        name: &'static str,
        value: f64,
        max_frames: u64,
    },
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error(
        "t_invis_min ({t_invis_min} s) is shorter than one frame at {frame_rate} Hz; cycles need an invisible phase"
    )]
    InvisibleTooShort { t_invis_min: f64, frame_rate: f64 },
    #[error("target_probability must lie in [0, 1], got {0}")]
    Probability(f64),
    #[error("min_distance must be positive and finite, got {0}")]
    MinDistance(f64),
    #[error("placement.max_attempts must be at least 1")]
    NoAttempts,
    #[error("stage of {width:.1} x {height:.1} cm leaves no room once inset by {min_distance} cm")]
    StageTooSmall {
        width: f64,
        height: f64,
        min_distance: f64,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("placement region is empty after inset by {min_distance}")]
    EmptyRegion { min_distance: f64 },
    #[error(
        "no position at least {min_distance} away from {occupied} items after {attempts} attempts"
    )]
    Starved {
        occupied: usize,
        attempts: u32,
        min_distance: f64,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),
    #[error("display failed: {0}")]
    Display(String),
    #[error("failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
