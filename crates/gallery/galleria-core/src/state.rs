//! Per-instance gallery state record and its write vocabulary.

use serde::{Deserialize, Serialize};

use crate::ids::{LightboxHandle, TransitionId, VisualId};
use crate::intent::Direction;
use crate::store::Record;

/// State of one gallery widget. Mutated only through [`GalleryWrite`]s
/// applied by the controller's store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryState {
    pub current_image_index: usize,
    /// Total thumbnail count; fixed at construction.
    pub img_thumb_amount: usize,
    pub all_images_loaded: bool,
    pub is_animating: bool,
    pub next_dir: Direction,
    pub active_thumbnail: Option<usize>,
    pub current_main_visual: Option<VisualId>,
    /// Latch shared by the touch and wheel channels.
    pub is_touch_animation: bool,
    pub is_mouse_down: bool,
    /// Latch for the mouse-drag channel.
    pub has_mouse_animated: bool,
    pub lightbox: Option<LightboxHandle>,
}

impl GalleryState {
    pub fn new(img_thumb_amount: usize) -> Self {
        Self {
            current_image_index: 0,
            img_thumb_amount,
            all_images_loaded: false,
            is_animating: false,
            next_dir: Direction::Forward,
            active_thumbnail: None,
            current_main_visual: None,
            is_touch_animation: false,
            is_mouse_down: false,
            has_mouse_animated: false,
            lightbox: None,
        }
    }

    /// Counter text shown next to the main visual, e.g. `3 / 15`.
    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.current_image_index + 1, self.img_thumb_amount)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryField {
    CurrentImageIndex,
    AllImagesLoaded,
    IsAnimating,
    NextDir,
    ActiveThumbnail,
    CurrentMainVisual,
    IsTouchAnimation,
    IsMouseDown,
    HasMouseAnimated,
    Lightbox,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryWrite {
    CurrentImageIndex(usize),
    AllImagesLoaded(bool),
    IsAnimating(bool),
    NextDir(Direction),
    ActiveThumbnail(Option<usize>),
    CurrentMainVisual(Option<VisualId>),
    IsTouchAnimation(bool),
    IsMouseDown(bool),
    HasMouseAnimated(bool),
    Lightbox(Option<LightboxHandle>),
}

impl Record for GalleryState {
    type Field = GalleryField;
    type Write = GalleryWrite;

    fn apply(&mut self, write: &GalleryWrite) {
        match *write {
            GalleryWrite::CurrentImageIndex(i) => self.current_image_index = i,
            GalleryWrite::AllImagesLoaded(b) => self.all_images_loaded = b,
            GalleryWrite::IsAnimating(b) => self.is_animating = b,
            GalleryWrite::NextDir(d) => self.next_dir = d,
            GalleryWrite::ActiveThumbnail(t) => self.active_thumbnail = t,
            GalleryWrite::CurrentMainVisual(v) => self.current_main_visual = v,
            GalleryWrite::IsTouchAnimation(b) => self.is_touch_animation = b,
            GalleryWrite::IsMouseDown(b) => self.is_mouse_down = b,
            GalleryWrite::HasMouseAnimated(b) => self.has_mouse_animated = b,
            GalleryWrite::Lightbox(h) => self.lightbox = h,
        }
    }

    fn field(write: &GalleryWrite) -> GalleryField {
        match write {
            GalleryWrite::CurrentImageIndex(_) => GalleryField::CurrentImageIndex,
            GalleryWrite::AllImagesLoaded(_) => GalleryField::AllImagesLoaded,
            GalleryWrite::IsAnimating(_) => GalleryField::IsAnimating,
            GalleryWrite::NextDir(_) => GalleryField::NextDir,
            GalleryWrite::ActiveThumbnail(_) => GalleryField::ActiveThumbnail,
            GalleryWrite::CurrentMainVisual(_) => GalleryField::CurrentMainVisual,
            GalleryWrite::IsTouchAnimation(_) => GalleryField::IsTouchAnimation,
            GalleryWrite::IsMouseDown(_) => GalleryField::IsMouseDown,
            GalleryWrite::HasMouseAnimated(_) => GalleryField::HasMouseAnimated,
            GalleryWrite::Lightbox(_) => GalleryField::Lightbox,
        }
    }
}

/// Phase of the transition state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum Phase {
    Idle,
    /// The new visual was requested; `incoming` is set once it resolved and
    /// was mounted, while it decodes.
    Loading {
        ticket: TransitionId,
        index: usize,
        outgoing: Option<VisualId>,
        incoming: Option<VisualId>,
    },
    /// The new visual is fading in and `outgoing` is fading out.
    EnteringAndExiting {
        ticket: TransitionId,
        index: usize,
        outgoing: VisualId,
    },
}

impl Phase {
    pub fn ticket(&self) -> Option<TransitionId> {
        match *self {
            Phase::Idle => None,
            Phase::Loading { ticket, .. } | Phase::EnteringAndExiting { ticket, .. } => {
                Some(ticket)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading { incoming: None, .. } => "loading",
            Phase::Loading { .. } => "decoding",
            Phase::EnteringAndExiting { .. } => "entering-and-exiting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_field_agree() {
        let mut s = GalleryState::new(5);
        let w = GalleryWrite::CurrentImageIndex(3);
        s.apply(&w);
        assert_eq!(GalleryState::field(&w), GalleryField::CurrentImageIndex);
        assert_eq!(s.counter_text(), "4 / 5");

        s.apply(&GalleryWrite::ActiveThumbnail(Some(3)));
        s.apply(&GalleryWrite::NextDir(Direction::Backward));
        assert_eq!(s.active_thumbnail, Some(3));
        assert_eq!(s.next_dir, Direction::Backward);
        assert_eq!(s.img_thumb_amount, 5);
    }

    #[test]
    fn phase_ticket_and_name() {
        assert_eq!(Phase::Idle.ticket(), None);
        let p = Phase::Loading {
            ticket: TransitionId(2),
            index: 1,
            outgoing: None,
            incoming: Some(VisualId(9)),
        };
        assert_eq!(p.ticket(), Some(TransitionId(2)));
        assert_eq!(p.name(), "decoding");
    }
}
