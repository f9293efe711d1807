//! Identifiers for transitions and host-owned handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ticket identifying one transition (one main-visual load). Completions
/// reported by the host carry the ticket they belong to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub u32);

/// Host-allocated handle for a resolved visual element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// Host-allocated handle for a lightbox bound to one main visual.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LightboxHandle(pub u32);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic allocator for transition tickets.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_transition: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_transition(&mut self) -> TransitionId {
        let id = TransitionId(self.next_transition);
        self.next_transition = self.next_transition.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
