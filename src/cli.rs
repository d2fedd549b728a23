use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (written with commented defaults if missing)
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Seed for the session RNG (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without a window: no drawing, no clicks
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Stop after this many frames (headless only)
    #[arg(long)]
    pub frames: Option<u64>,

    /// Pace headless frames at the configured frame rate
    #[arg(long, default_value_t = false)]
    pub realtime: bool,

    /// Number of items on screen (overrides config)
    #[arg(long)]
    pub n_stimuli: Option<usize>,

    /// Chance that an expiring item comes back as the target (overrides config)
    #[arg(long)]
    pub target_probability: Option<f64>,
}

impl Args {
    pub fn apply_overrides(&self, cfg: &mut AppConfig) {
        if let Some(seed) = self.seed {
            cfg.session.seed = Some(seed);
        }
        if let Some(n) = self.n_stimuli {
            cfg.stimuli.n_stimuli = n;
        }
        if let Some(p) = self.target_probability {
            cfg.target.probability = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let args = Args::parse_from([
            "blinksearch",
            "--seed",
            "7",
            "--n-stimuli",
            "4",
            "--target-probability",
            "0.5",
            "--nogui",
            "--frames",
            "600",
        ]);
        assert!(args.nogui);
        assert_eq!(args.frames, Some(600));
        let mut cfg = AppConfig::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.session.seed, Some(7));
        assert_eq!(cfg.stimuli.n_stimuli, 4);
        assert_eq!(cfg.target.probability, 0.5);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["blinksearch"]);
        assert_eq!(args.config, "config.toml");
        let mut cfg = AppConfig::default();
        cfg.session.seed = Some(3);
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.session.seed, Some(3));
        assert_eq!(cfg.stimuli.n_stimuli, 10);
    }
}
