//! Collaborator contracts the controller drives.
//!
//! The controller never blocks. Every call below is a request; anything that
//! completes later is reported back through the matching `Gallery` method
//! (`main_visual_resolved`, `main_visual_ready`, `exit_finished`,
//! `thumbnail_decoded`, ...). Implementations must not call back into the
//! gallery from inside these methods.

use std::time::Duration;

use crate::ids::{LightboxHandle, TransitionId, VisualId};
use crate::images::ImageEntry;
use crate::intent::Direction;

/// Animation marker attached to a visual. Markers are boolean flags for the
/// presentation layer (CSS classes in a browser), never state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Present while the incoming visual decodes; removing it starts the fade-in.
    Enter(Direction),
    /// Added to the outgoing visual to start its fade-out.
    Exit(Direction),
}

impl Marker {
    pub fn class_name(&self) -> &'static str {
        match self {
            Marker::Enter(Direction::Forward) => "fade-in-forward",
            Marker::Enter(Direction::Backward) => "fade-in-backward",
            Marker::Exit(Direction::Forward) => "fade-out-forward",
            Marker::Exit(Direction::Backward) => "fade-out-backward",
        }
    }
}

/// Image-resolution collaborator.
pub trait ImageSource {
    /// Resolve and decode the thumbnail for `index`; report back with
    /// `thumbnail_decoded` or `thumbnail_failed`.
    fn request_thumbnail(&mut self, index: usize, image: &ImageEntry);

    /// Resolve the full-size visual for `index`; report back with
    /// `main_visual_resolved` and then `main_visual_ready`, or
    /// `main_visual_failed`.
    fn request_main_visual(&mut self, ticket: TransitionId, index: usize, image: &ImageEntry);
}

/// Display tree of one gallery instance.
pub trait DisplayTree {
    /// Share the crossfade duration with the presentation layer.
    fn set_transition_duration(&mut self, duration: Duration);

    /// Insert the thumbnail for `index` into the strip, hidden.
    fn insert_thumbnail(&mut self, index: usize, image: &ImageEntry);
    fn set_thumbnail_visible(&mut self, index: usize, visible: bool);
    fn show_thumbnail_placeholder(&mut self, index: usize);
    fn set_thumbnail_active(&mut self, index: usize, active: bool);
    /// Center the thumbnail horizontally in the strip. Best effort.
    fn scroll_thumbnail_into_view(&mut self, index: usize);

    fn set_counter_text(&mut self, text: &str);

    fn mount_main_visual(&mut self, visual: VisualId, image: &ImageEntry);
    fn unmount_main_visual(&mut self, visual: VisualId);
    /// Mount a placeholder in place of a main visual that failed to load.
    /// Returns its handle so the next transition can retire it like any other
    /// main visual; `None` when nothing was mounted.
    fn show_main_placeholder(&mut self, index: usize, image: &ImageEntry) -> Option<VisualId>;

    fn add_marker(&mut self, visual: VisualId, marker: Marker);
    fn remove_marker(&mut self, visual: VisualId, marker: Marker);

    /// Wait out the exit animation of `visual`, then report `exit_finished`.
    /// Hosts may complete on an animation-end signal or after `duration`.
    fn await_exit(&mut self, ticket: TransitionId, visual: VisualId, duration: Duration);

    /// Replace the caption overlay (title, description, lightbox action).
    fn render_overlay(&mut self, index: usize, image: &ImageEntry);

    /// Attach or detach pointer-move tracking for mouse drags.
    fn set_drag_tracking(&mut self, active: bool);
}

/// Lightbox collaborator.
pub trait Lightbox {
    /// Bind a lightbox to a freshly displayed visual. `None` when no lightbox
    /// is available; the gallery keeps working without one.
    fn build_lightbox(&mut self, visual: VisualId) -> Option<LightboxHandle>;
    fn open_lightbox(&mut self, handle: LightboxHandle, slide: usize);
}

/// Everything a gallery needs from its environment.
pub trait GalleryHost: ImageSource + DisplayTree + Lightbox {}

impl<T: ImageSource + DisplayTree + Lightbox> GalleryHost for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_class_names() {
        assert_eq!(Marker::Enter(Direction::Forward).class_name(), "fade-in-forward");
        assert_eq!(Marker::Exit(Direction::Backward).class_name(), "fade-out-backward");
    }
}
