//! Test doubles for driving a `FrameLoop` frame by frame.

#![allow(dead_code)]

use blinksearch::core::geometry::{Bounds, Point};
use blinksearch::search::TaskParams;
use blinksearch::search::io::{InputDevice, PressSample, Renderer};
use blinksearch::search::item::Item;

/// Button states per frame; frames past the end of the script are "up".
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pub downs: Vec<bool>,
    pub pointer: Point,
    /// Terminate once this many frames have completed.
    pub stop_after: Option<u64>,
    pub press_polls: u64,
    pub termination_polls: u64,
    pub position_polls: u64,
    pub resets: u64,
}

impl ScriptedInput {
    pub fn idle() -> Self {
        Self::default()
    }

    /// `script` is one char per frame: `#` pressed, anything else released.
    pub fn from_script(script: &str) -> Self {
        Self {
            downs: script.chars().map(|c| c == '#').collect(),
            ..Self::default()
        }
    }
}

impl InputDevice for ScriptedInput {
    fn poll_termination(&mut self) -> bool {
        self.termination_polls += 1;
        self.stop_after
            .is_some_and(|n| self.termination_polls >= n)
    }

    fn poll_press(&mut self) -> PressSample {
        let idx = self.press_polls as usize;
        self.press_polls += 1;
        PressSample {
            down: self.downs.get(idx).copied().unwrap_or(false),
            time_secs: idx as f64 / 60.0,
        }
    }

    fn poll_position(&mut self) -> Point {
        self.position_polls += 1;
        self.pointer
    }

    fn reset_press_state(&mut self) {
        self.resets += 1;
    }
}

/// Keeps every frame's draw list and each cursor change.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub current: Vec<Item>,
    pub frames: Vec<Vec<Item>>,
    pub cursor: Vec<bool>,
}

impl RecordingRenderer {
    pub fn cursor_visible(&self) -> bool {
        self.cursor.last().copied().unwrap_or(true)
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, item: &Item) {
        self.current.push(item.clone());
    }

    fn present(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor.push(visible);
    }
}

/// Short cycles so many resets happen within a few thousand frames.
pub fn busy_params() -> TaskParams {
    TaskParams {
        n_stimuli: 8,
        t_vis_min: 0.1,
        t_vis_max: 0.5,
        t_vis_target: 0.2,
        t_invis_min: 0.1,
        t_invis_max: 0.5,
        frame_rate: 60.0,
        target_probability: 0.5,
        target_wait_time: 1.0,
        min_distance: 10.0,
        max_placement_attempts: 10_000,
        stage: Bounds::centered(80.0, 60.0),
    }
}

pub fn assert_separated(items: &[Item], min_distance: f64) {
    let active: Vec<Point> = items.iter().filter_map(|i| i.position).collect();
    for (a, pa) in active.iter().enumerate() {
        for pb in &active[a + 1..] {
            let d = pa.distance(*pb);
            assert!(d >= min_distance, "items {pa:?} and {pb:?} only {d} apart");
        }
    }
}
