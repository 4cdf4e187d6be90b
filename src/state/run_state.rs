/// Run state definitions for the fetch orchestrator
///
/// A crawl run moves through `Idle → Running ⇄ Draining → Done`.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// The coordinator has been built but not started
    Idle,

    /// Targets are being dequeued and fetches dispatched
    Running,

    /// The frontier is empty and in-flight fetches are finishing
    Draining,

    /// The frontier is exhausted and nothing is in flight
    Done,
}

impl RunState {
    /// Returns true if the run has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true while fetches may still complete
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Draining)
    }

    /// Checks whether moving from `self` to `next` is allowed
    ///
    /// Draining can fall back to Running when a finishing fetch discovers
    /// new targets. A run that never queued anything may go straight from
    /// Running to Done.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Running, Self::Done)
                | (Self::Draining, Self::Running)
                | (Self::Draining, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
