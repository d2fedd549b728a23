use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Instant;
use tracing::{info, trace};

use crate::core::geometry::Point;
use crate::core::timebase::{Frame, Timebase};
use crate::error::Result;
use crate::search::events::EventLog;
use crate::search::io::{InputDevice, PressSample, Renderer};
use crate::search::item::Item;
use crate::search::{FrameLoop, FrameOutcome};

/// Renderer that only counts what it was asked to do.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub draws: u64,
    pub presents: u64,
    pub cursor_visible: bool,
}

impl Renderer for NullRenderer {
    fn draw(&mut self, _item: &Item) {
        self.draws += 1;
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

/// Input with the button never pressed. Stops at an optional frame limit or
/// when `stop` is raised.
#[derive(Debug)]
pub struct IdleInput {
    frame_limit: Option<Frame>,
    frames: Frame,
    stop: Arc<AtomicBool>,
    press_epoch: Instant,
}

impl IdleInput {
    pub fn new(frame_limit: Option<Frame>, stop: Arc<AtomicBool>) -> Self {
        Self {
            frame_limit,
            frames: 0,
            stop,
            press_epoch: Instant::now(),
        }
    }
}

impl InputDevice for IdleInput {
    fn poll_termination(&mut self) -> bool {
        self.frames += 1;
        if self.stop.load(Ordering::SeqCst) {
            return true;
        }
        self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }

    fn poll_press(&mut self) -> PressSample {
        PressSample {
            down: false,
            time_secs: self.press_epoch.elapsed().as_secs_f64(),
        }
    }

    fn poll_position(&mut self) -> Point {
        Point::ORIGIN
    }

    fn reset_press_state(&mut self) {
        self.press_epoch = Instant::now();
    }
}

/// Runs a session without a display. With `realtime`, frames are paced on
/// deadlines at the session frame rate.
pub fn run<L: EventLog>(
    session: &mut FrameLoop<L>,
    frame_rate: f64,
    frame_limit: Option<Frame>,
    realtime: bool,
    stop: Arc<AtomicBool>,
) -> Result<NullRenderer> {
    let mut renderer = NullRenderer::default();
    if frame_limit == Some(0) {
        info!("frame limit is 0; nothing to run");
        return Ok(renderer);
    }
    let mut input = IdleInput::new(frame_limit, stop);
    let frame_duration = Timebase::new(frame_rate).frame_duration();
    let mut next_deadline = Instant::now();

    loop {
        next_deadline += frame_duration;
        if session.step(&mut renderer, &mut input)? == FrameOutcome::Terminate {
            break;
        }
        if realtime {
            let now = Instant::now();
            if now < next_deadline {
                std::thread::sleep(next_deadline - now);
            } else {
                next_deadline = now;
                trace!(frame = session.frame(), "frame overrun");
            }
        }
    }

    let stats = session.stats();
    info!(
        frames = stats.frames,
        mean_visible = stats.mean_visible(),
        max_visible = stats.max_visible,
        targets = stats.targets,
        draws = renderer.draws,
        "headless session finished"
    );
    Ok(renderer)
}
