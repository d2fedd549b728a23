use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::core::timebase::Frame;
use crate::error::{PlacementError, Result};
use crate::search::events::{EventLog, TrialEvent};
use crate::search::interaction::{InteractionAction, InteractionState, InteractionStateMachine};
use crate::search::io::{InputDevice, Renderer};
use crate::search::item::Item;
use crate::search::params::TaskParams;
use crate::search::placement::PlacementEngine;
use crate::search::scheduler::{CycleTiming, VisibilityScheduler};
use crate::search::shapes::ShapeAssignment;
use crate::search::stats::VisibilityStats;
use crate::search::target_gate::TargetGate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Terminate,
}

/// Single owner of all session state. One [`FrameLoop::step`] per display
/// refresh; nothing suspends mid-frame.
pub struct FrameLoop<L: EventLog> {
    scheduler: VisibilityScheduler,
    gate: TargetGate,
    interaction: InteractionStateMachine,
    rng: StdRng,
    frame: Frame,
    log: L,
    stats: VisibilityStats,
    seed: u64,
    started: bool,
}

impl<L: EventLog> FrameLoop<L> {
    /// Validates `params`, draws the session's target shape and places every
    /// slot. All randomness comes from `seed`.
    pub fn new(params: &TaskParams, n_shapes: usize, seed: u64, log: L) -> Result<Self> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let shapes = ShapeAssignment::draw(n_shapes, &mut rng);
        let placement = PlacementEngine::new(
            params.stage,
            params.min_distance,
            params.max_placement_attempts,
        )?;
        let mut gate = TargetGate::new(params.target_probability, params.target_wait_frames());
        let mut scheduler = VisibilityScheduler::new(
            params.n_stimuli,
            placement,
            shapes,
            CycleTiming::from_params(params),
        );
        scheduler.populate(0, &mut gate, &mut rng)?;
        info!(
            seed,
            n_stimuli = params.n_stimuli,
            target_shape = scheduler.shapes().target,
            "session ready"
        );
        Ok(Self {
            scheduler,
            gate,
            interaction: InteractionStateMachine::new(),
            rng,
            frame: 0,
            log,
            stats: VisibilityStats::default(),
            seed,
            started: false,
        })
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn items(&self) -> &[Item] {
        self.scheduler.items()
    }

    pub fn target_shape(&self) -> usize {
        self.scheduler.shapes().target
    }

    pub fn gate(&self) -> &TargetGate {
        &self.gate
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn stats(&self) -> &VisibilityStats {
        &self.stats
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    /// Runs one frame: draw, expire and restart cycles, handle input,
    /// present, advance. Termination is polled only after all of that.
    pub fn step<R, I>(
        &mut self,
        renderer: &mut R,
        input: &mut I,
    ) -> std::result::Result<FrameOutcome, PlacementError>
    where
        R: Renderer + ?Sized,
        I: InputDevice + ?Sized,
    {
        if !self.started {
            renderer.set_cursor_visible(false);
            input.reset_press_state();
            self.started = true;
        }
        let frame = self.frame;

        let mut visible = 0;
        let mut target_visible = false;
        for item in self.scheduler.items() {
            if item.is_visible(frame) {
                renderer.draw(item);
                visible += 1;
                target_visible |= item.is_target();
            }
        }
        self.stats.record_frame(visible, target_visible);

        for idx in 0..self.scheduler.items().len() {
            if !self.scheduler.items()[idx].is_expired(frame) {
                continue;
            }
            let is_target = self.gate.may_become_target(frame, &mut self.rng);
            if let Some(event) =
                self.scheduler
                    .reset(idx, frame, is_target, false, &mut self.gate, &mut self.rng)?
            {
                self.stats.record_target();
                self.log.record(event);
            }
        }

        let press = input.poll_press();
        if let Some(action) = self.interaction.on_sample(press.down) {
            debug!(frame, ?action, state = ?self.interaction.state(), "interaction");
            match action {
                InteractionAction::LogDetectPress => self.log.record(TrialEvent::DetectPress {
                    frame,
                    press_secs: press.time_secs,
                }),
                InteractionAction::ShowCursor => renderer.set_cursor_visible(true),
                InteractionAction::LogPointPress => {
                    let position = input.poll_position();
                    self.log.record(TrialEvent::PointPress { frame, position });
                }
                InteractionAction::HideCursorAndResetClock => {
                    renderer.set_cursor_visible(false);
                    input.reset_press_state();
                }
            }
        }

        renderer.present();
        self.frame += 1;

        if input.poll_termination() {
            info!(frames = self.frame, "termination requested");
            return Ok(FrameOutcome::Terminate);
        }
        Ok(FrameOutcome::Continue)
    }

    /// Steps until the input device asks to stop. Returns the number of
    /// frames shown.
    pub fn run<R, I>(
        &mut self,
        renderer: &mut R,
        input: &mut I,
    ) -> std::result::Result<Frame, PlacementError>
    where
        R: Renderer + ?Sized,
        I: InputDevice + ?Sized,
    {
        while self.step(renderer, input)? == FrameOutcome::Continue {}
        Ok(self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Bounds, Point};
    use crate::headless::{IdleInput, NullRenderer};
    use rand::Rng;
    use std::sync::{Arc, atomic::AtomicBool};

    /// One slot with fixed 6-frame phases, so it expires at frame 12.
    fn single_slot(target_probability: f64) -> TaskParams {
        TaskParams {
            n_stimuli: 1,
            t_vis_min: 0.1,
            t_vis_max: 0.1,
            t_invis_min: 0.1,
            t_invis_max: 0.1,
            target_probability,
            target_wait_time: 0.0,
            ..TaskParams::default()
        }
    }

    /// Steps up to the expiring frame and returns the RNG as it stood
    /// right before that frame.
    fn rng_before_expiry(lp: &mut FrameLoop<Vec<TrialEvent>>) -> StdRng {
        let mut renderer = NullRenderer::default();
        let mut input = IdleInput::new(None, Arc::new(AtomicBool::new(false)));
        while lp.frame() < 12 {
            lp.step(&mut renderer, &mut input).unwrap();
        }
        assert_eq!(lp.items()[0].invisible_until, 12);
        let before = lp.rng.clone();
        lp.step(&mut renderer, &mut input).unwrap();
        before
    }

    fn region_point(x: f64, y: f64) -> Point {
        let region = Bounds::centered(80.0, 60.0).inset(10.0).unwrap();
        region.lerp(x, y)
    }

    #[test]
    fn gate_roll_precedes_distractor_draws() {
        let mut lp = FrameLoop::new(&single_slot(0.0), 5, 8, Vec::new()).unwrap();
        let mut replay = rng_before_expiry(&mut lp);

        let _roll = replay.random::<f64>();
        let distractors: Vec<usize> = (0..5).filter(|&s| s != lp.target_shape()).collect();
        let shape = distractors[replay.random_range(0..distractors.len())];
        let position = region_point(replay.random::<f64>(), replay.random::<f64>());
        let _visible = replay.random::<f64>();
        let _invisible = replay.random::<f64>();

        let item = &lp.items()[0];
        assert_eq!(item.role, crate::search::item::Role::Distractor);
        assert_eq!(item.shape, shape);
        assert_eq!(item.position, Some(position));
        assert_eq!((item.visible_until, item.invisible_until), (18, 24));
        assert_eq!(lp.rng.random::<u64>(), replay.random::<u64>());
    }

    #[test]
    fn gate_roll_precedes_target_draws() {
        let mut lp = FrameLoop::new(&single_slot(1.0), 5, 9, Vec::new()).unwrap();
        let mut replay = rng_before_expiry(&mut lp);

        let _roll = replay.random::<f64>();
        let position = region_point(replay.random::<f64>(), replay.random::<f64>());
        let _invisible = replay.random::<f64>();

        let item = &lp.items()[0];
        assert!(item.is_target());
        assert_eq!(item.shape, lp.target_shape());
        assert_eq!(item.position, Some(position));
        assert_eq!((item.visible_until, item.invisible_until), (24, 30));
        assert_eq!(lp.rng.random::<u64>(), replay.random::<u64>());
        assert_eq!(lp.log().len(), 1);
    }
}
