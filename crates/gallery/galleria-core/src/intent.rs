//! Navigation intents and their dispatch outcomes.

use serde::{Deserialize, Serialize};

use crate::ids::TransitionId;

/// Relative navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Prev,
    Next,
}

impl Step {
    /// Target index for this step from `current` in a gallery of `len`
    /// images, wrapping at both ends.
    #[inline]
    pub fn apply(self, current: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            Step::Prev if current == 0 => len - 1,
            Step::Prev => current - 1,
            Step::Next if current + 1 >= len => 0,
            Step::Next => current + 1,
        }
    }

    /// Direction reported for a step, independent of wraparound.
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Step::Prev => Direction::Backward,
            Step::Next => Direction::Forward,
        }
    }
}

/// Direction of a transition; selects the crossfade marker variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Direction for a jump from `from` to `to` by raw index comparison.
    #[inline]
    pub fn between(from: usize, to: usize) -> Direction {
        if from > to {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// A navigation request that can be deferred in the event queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Thumbnail(usize),
    Step(Step),
}

/// Input channel an intent originated from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Click,
    Touch,
    Wheel,
    Drag,
    /// The initial load issued by `Gallery::start`.
    Startup,
    /// Replayed from the event queue after a transition finished.
    Replay,
}

/// What the controller did with an intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// A transition started.
    Accepted(TransitionId),
    /// Deferred until the in-flight transition completes.
    Queued { pending: usize },
    /// Deferred queue was full.
    Dropped,
    /// A channel latch swallowed a repeat from the same gesture.
    Suppressed,
    /// Nothing to do (below threshold, outside region, already active).
    Ignored,
}

impl Dispatch {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Dispatch::Accepted(_))
    }
}
