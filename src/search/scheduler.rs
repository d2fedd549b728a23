use rand::Rng;
use tracing::{debug, info, warn};

use crate::core::geometry::Point;
use crate::core::timebase::{Frame, Timebase};
use crate::error::PlacementError;
use crate::search::events::TrialEvent;
use crate::search::item::{Item, Role};
use crate::search::params::TaskParams;
use crate::search::placement::PlacementEngine;
use crate::search::shapes::ShapeAssignment;
use crate::search::target_gate::TargetGate;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleTiming {
    pub timebase: Timebase,
    pub t_vis_min: f64,
    pub t_vis_max: f64,
    pub t_invis_min: f64,
    pub t_invis_max: f64,
    pub target_visible: Frame,
}

impl CycleTiming {
    pub fn from_params(p: &TaskParams) -> Self {
        Self {
            timebase: p.timebase(),
            t_vis_min: p.t_vis_min,
            t_vis_max: p.t_vis_max,
            t_invis_min: p.t_invis_min,
            t_invis_max: p.t_invis_max,
            target_visible: p.target_visible_frames(),
        }
    }

    fn distractor_visible<R: Rng + ?Sized>(&self, rng: &mut R) -> Frame {
        self.timebase
            .sec_to_frames(uniform(rng, self.t_vis_min, self.t_vis_max))
    }

    fn invisible<R: Rng + ?Sized>(&self, rng: &mut R) -> Frame {
        self.timebase
            .sec_to_frames(uniform(rng, self.t_invis_min, self.t_invis_max))
    }
}

/// `lo + r * (hi - lo)` with a single draw, so `lo == hi` is fine.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + rng.random::<f64>() * (hi - lo)
}

/// Owns every slot and starts their visibility cycles.
#[derive(Clone, Debug)]
pub struct VisibilityScheduler {
    items: Vec<Item>,
    placement: PlacementEngine,
    shapes: ShapeAssignment,
    timing: CycleTiming,
    occupied: Vec<Point>,
}

impl VisibilityScheduler {
    /// Slots start unplaced; call [`Self::populate`] before the first frame.
    pub fn new(
        n_stimuli: usize,
        placement: PlacementEngine,
        shapes: ShapeAssignment,
        timing: CycleTiming,
    ) -> Self {
        Self {
            items: vec![Item::unplaced(); n_stimuli],
            placement,
            shapes,
            timing,
            occupied: Vec::with_capacity(n_stimuli),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn shapes(&self) -> &ShapeAssignment {
        &self.shapes
    }

    pub fn timing(&self) -> &CycleTiming {
        &self.timing
    }

    /// Starts every slot as a distractor at `frame`. The first half starts
    /// already invisible so the population does not blink in lockstep.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        frame: Frame,
        gate: &mut TargetGate,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        let half = self.items.len() / 2;
        for idx in 0..self.items.len() {
            self.reset(idx, frame, false, idx < half, gate, rng)?;
        }
        debug!(n = self.items.len(), "population placed");
        Ok(())
    }

    /// Starts a new cycle for slot `idx`. Returns the spawn record when the
    /// slot became the target.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        idx: usize,
        frame: Frame,
        is_target: bool,
        start_invisible: bool,
        gate: &mut TargetGate,
        rng: &mut R,
    ) -> Result<Option<TrialEvent>, PlacementError> {
        let (role, shape) = if is_target {
            (Role::Target, self.shapes.target)
        } else {
            (Role::Distractor, self.shapes.draw_distractor(rng))
        };

        // Clear our own slot first so the old position cannot block the new one.
        let previous = self.items[idx].position.take();
        self.occupied.clear();
        self.occupied
            .extend(self.items.iter().filter_map(|item| item.position));
        let position = match self.placement.pick(&self.occupied, rng) {
            Ok(p) => p,
            Err(err) => {
                self.items[idx].position = previous;
                warn!(slot = idx, frame, %err, "placement starved");
                return Err(err);
            }
        };

        let visible = if is_target {
            self.timing.target_visible
        } else {
            self.timing.distractor_visible(rng)
        };
        let invisible = self.timing.invisible(rng);

        let mut visible_until = frame.saturating_add(visible);
        let mut invisible_until = visible_until.saturating_add(invisible);
        if start_invisible {
            visible_until = visible_until.saturating_sub(visible);
            invisible_until = invisible_until.saturating_sub(visible);
        }

        let item = &mut self.items[idx];
        item.role = role;
        item.shape = shape;
        item.position = Some(position);
        item.visible_until = visible_until;
        item.invisible_until = invisible_until;

        if role == Role::Target {
            gate.record_target(invisible_until);
            info!(
                slot = idx,
                frame,
                x = position.x,
                y = position.y,
                next_allowed = gate.next_allowed(),
                "target spawned"
            );
            return Ok(Some(TrialEvent::TargetSpawn {
                frame,
                position,
                cycle_end: invisible_until,
            }));
        }
        Ok(None)
    }
}
