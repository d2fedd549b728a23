// Entry point: loads config, seeds the session, then runs it in a window or headless.
use blinksearch::app;
use blinksearch::cli::Args;
use blinksearch::config::AppConfig;
use blinksearch::error::Result;
use blinksearch::headless;
use blinksearch::search::FrameLoop;
use blinksearch::search::events::StdoutLog;
use blinksearch::search::shapes::ShapeCatalogue;

use clap::Parser;
use std::process::ExitCode;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // stdout is reserved for trial lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "blinksearch failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut cfg = AppConfig::load_or_default(&args.config);
    args.apply_overrides(&mut cfg);
    let params = cfg.task_params()?;

    let seed = cfg.session.seed.unwrap_or_else(rand::random::<u64>);
    info!(seed, "session seed (pass --seed to replay)");

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    })?;

    let catalogue = ShapeCatalogue::standard();
    let mut session = FrameLoop::new(&params, catalogue.len(), seed, StdoutLog::default())?;

    if args.nogui {
        headless::run(
            &mut session,
            params.frame_rate,
            args.frames,
            args.realtime,
            stop_flag,
        )?;
        info!(
            measured = session.stats().mean_visible(),
            expected = params.expected_visible(),
            trial_lines = session.log().lines(),
            "mean items on screen"
        );
        return Ok(());
    }

    app::run(session, &cfg.display, params.stage, stop_flag)
}
