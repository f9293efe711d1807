//! Semantic events emitted by the controller.
//!
//! Events are informational; hosts drain them for diagnostics or to mirror
//! progress into their own UI state. Retention is bounded by
//! `Config::max_events`, discarding the oldest first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::ids::{TransitionId, VisualId};
use crate::intent::{Direction, Intent, Modality};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
#[non_exhaustive]
pub enum GalleryEvent {
    TransitionStarted {
        ticket: TransitionId,
        from: usize,
        to: usize,
        direction: Direction,
        modality: Modality,
    },
    VisualMounted {
        ticket: TransitionId,
        visual: VisualId,
    },
    TransitionFinished {
        ticket: TransitionId,
        index: usize,
    },
    IntentQueued {
        intent: Intent,
        pending: usize,
    },
    IntentDropped {
        intent: Intent,
    },
    IntentReplayed {
        intent: Intent,
    },
    ThumbnailsReady {
        count: usize,
    },
    LoadFailed {
        ticket: Option<TransitionId>,
        index: usize,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct EventLog {
    events: VecDeque<GalleryEvent>,
    limit: usize,
    discarded: u64,
}

impl EventLog {
    pub fn new(limit: usize) -> Self {
        Self {
            events: VecDeque::new(),
            limit: limit.max(1),
            discarded: 0,
        }
    }

    pub fn push(&mut self, event: GalleryEvent) {
        if self.events.len() >= self.limit {
            self.events.pop_front();
            self.discarded = self.discarded.wrapping_add(1);
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<GalleryEvent> {
        self.events.drain(..).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events evicted because the log was full.
    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryEvent> {
        self.events.iter()
    }
}
