//! Trial records. The `Display` forms are the line format downstream
//! analysis parses, so they must not change.

use std::fmt;
use tracing::debug;

use crate::core::geometry::Point;
use crate::core::timebase::Frame;

#[derive(Clone, Debug, PartialEq)]
pub enum TrialEvent {
    TargetSpawn {
        frame: Frame,
        position: Point,
        /// End of the target's cycle; not printed.
        cycle_end: Frame,
    },
    DetectPress {
        frame: Frame,
        /// Seconds on the input device's press clock; not printed.
        press_secs: f64,
    },
    PointPress {
        frame: Frame,
        position: Point,
    },
}

impl fmt::Display for TrialEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialEvent::TargetSpawn {
                frame, position, ..
            } => write!(f, "target at frame {frame} at position {position}"),
            TrialEvent::DetectPress { frame, .. } => write!(f, "click at frame {frame}"),
            TrialEvent::PointPress { position, .. } => write!(f, "click at position ({position})"),
        }
    }
}

pub trait EventLog {
    fn record(&mut self, event: TrialEvent);
}

impl EventLog for Vec<TrialEvent> {
    fn record(&mut self, event: TrialEvent) {
        self.push(event);
    }
}

/// Writes every record to stdout, one per line.
#[derive(Debug, Default)]
pub struct StdoutLog {
    lines: u64,
}

impl StdoutLog {
    pub fn lines(&self) -> u64 {
        self.lines
    }
}

impl EventLog for StdoutLog {
    fn record(&mut self, event: TrialEvent) {
        debug!(?event, "trial event");
        println!("{event}");
        self.lines += 1;
    }
}
