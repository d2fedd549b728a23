pub mod events;
pub mod frame_loop;
pub mod interaction;
pub mod io;
pub mod item;
pub mod params;
pub mod placement;
pub mod scheduler;
pub mod shapes;
pub mod stats;
pub mod target_gate;

pub use frame_loop::{FrameLoop, FrameOutcome};
pub use params::TaskParams;
