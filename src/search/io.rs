use crate::core::geometry::Point;
use crate::search::item::Item;

/// Display side of a session. Implementations draw; they never touch
/// scheduler state.
pub trait Renderer {
    fn draw(&mut self, item: &Item);
    /// Ends the frame. May block until the display has flipped.
    fn present(&mut self);
    fn set_cursor_visible(&mut self, visible: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PressSample {
    pub down: bool,
    /// Seconds since the last `reset_press_state`.
    pub time_secs: f64,
}

pub trait InputDevice {
    fn poll_termination(&mut self) -> bool;
    fn poll_press(&mut self) -> PressSample;
    /// Pointer position in stage units.
    fn poll_position(&mut self) -> Point;
    fn reset_press_state(&mut self);
}
