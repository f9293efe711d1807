//! Gesture recognition: touch swipes, horizontal wheel and mouse drags.
//!
//! The recognizer only turns raw coordinates into [`Step`]s. Transition-level
//! latches (one fire per in-flight transition) live in the gallery state and
//! are applied by the controller.

use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;
use crate::intent::Step;

/// Coordinates of the current touch gesture, overwritten every cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchState {
    pub start_x: f32,
    pub end_x: f32,
}

/// Mouse-drag gesture state for one down/up cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub down_x: f32,
    /// Pointer-move samples are only considered while listening.
    pub listening: bool,
    /// Set once the drag produced a step; cleared on mouse-up.
    pub fired: bool,
}

#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    cfg: GestureConfig,
    touch: TouchState,
    drag: DragState,
}

impl GestureRecognizer {
    pub fn new(cfg: GestureConfig) -> Self {
        Self {
            cfg,
            touch: TouchState::default(),
            drag: DragState::default(),
        }
    }

    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn touch_start(&mut self, x: f32) {
        self.touch.start_x = x;
    }

    /// Finish a touch gesture. A swipe towards the left advances.
    pub fn touch_end(&mut self, x: f32, viewport_width: f32) -> Option<Step> {
        self.touch.end_x = x;
        let threshold = self.cfg.swipe.resolve(viewport_width);
        let delta = self.touch.end_x - self.touch.start_x;
        if !delta.is_finite() || !(delta.abs() > threshold) {
            return None;
        }
        if delta < 0.0 {
            Some(Step::Next)
        } else {
            Some(Step::Prev)
        }
    }

    pub fn wheel(&self, delta_x: f32) -> Option<Step> {
        let t = self.cfg.wheel_threshold;
        if !delta_x.is_finite() {
            None
        } else if delta_x > t {
            Some(Step::Next)
        } else if delta_x < -t {
            Some(Step::Prev)
        } else {
            None
        }
    }

    pub fn begin_drag(&mut self, x: f32) {
        self.drag = DragState {
            down_x: x,
            listening: true,
            fired: false,
        };
    }

    /// Pointer moved during a drag. Dragging the content to the right
    /// reveals the previous image. Fires at most once per down/up cycle.
    pub fn drag_move(&mut self, x: f32) -> Option<Step> {
        if !self.drag.listening || self.drag.fired {
            return None;
        }
        let delta = x - self.drag.down_x;
        let t = self.cfg.drag_threshold;
        let step = if !delta.is_finite() {
            return None;
        } else if delta > t {
            Step::Prev
        } else if delta < -t {
            Step::Next
        } else {
            return None;
        };
        self.drag.fired = true;
        Some(step)
    }

    /// Mouse released: stop listening and reset per-gesture flags.
    pub fn end_drag(&mut self) {
        self.drag.listening = false;
        self.drag.fired = false;
    }
}
