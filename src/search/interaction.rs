/// Where the viewer is in a detect-then-point response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    AwaitingDetectPress,
    AwaitingDetectRelease,
    AwaitingPointPress,
    AwaitingPointRelease,
}

/// Side effect requested by a transition; the frame loop carries it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionAction {
    /// The viewer claims to have seen the target.
    LogDetectPress,
    ShowCursor,
    /// The viewer points at where the target was.
    LogPointPress,
    HideCursorAndResetClock,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionStateMachine {
    state: InteractionState,
}

impl InteractionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Feeds one button sample. Each state waits for exactly one edge, so a
    /// held or idle button leaves the state alone.
    pub fn on_sample(&mut self, down: bool) -> Option<InteractionAction> {
        use InteractionState::*;
        let (next, action) = match (self.state, down) {
            (AwaitingDetectPress, true) => (AwaitingDetectRelease, InteractionAction::LogDetectPress),
            (AwaitingDetectRelease, false) => (AwaitingPointPress, InteractionAction::ShowCursor),
            (AwaitingPointPress, true) => (AwaitingPointRelease, InteractionAction::LogPointPress),
            (AwaitingPointRelease, false) => (
                AwaitingDetectPress,
                InteractionAction::HideCursorAndResetClock,
            ),
            _ => return None,
        };
        self.state = next;
        Some(action)
    }
}
