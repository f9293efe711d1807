//! Gallery controller: intent handling and the transition state machine.
//!
//! Transitions run `Idle -> Loading -> EnteringAndExiting -> Idle`. A
//! navigation intent is accepted only while no transition is in flight;
//! otherwise it is deferred in a bounded queue and replayed, one per
//! completed transition.
//!
//! Accepting an intent writes `is_animating`, `next_dir` and finally
//! `current_image_index` to the store. The index write cascades synchronously
//! into the counter text, the thumbnail highlight and the request for the
//! new main visual. Everything after that is driven by host completions.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{GalleryError, Result};
use crate::events::{EventLog, GalleryEvent};
use crate::gesture::GestureRecognizer;
use crate::host::{GalleryHost, Marker};
use crate::ids::{IdAllocator, TransitionId, VisualId};
use crate::images::ImageList;
use crate::intent::{Direction, Dispatch, Intent, Modality, Step};
use crate::queue::{Enqueue, EventQueue};
use crate::state::{GalleryState, GalleryWrite, Phase};
use crate::store::{Listener, Store};

/// Load status of one thumbnail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbSlot {
    Pending,
    Visible,
    Placeholder,
}

impl ThumbSlot {
    #[inline]
    pub fn is_settled(self) -> bool {
        !matches!(self, ThumbSlot::Pending)
    }
}

/// Serializable view of a gallery for hosts and diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GallerySnapshot {
    pub state: GalleryState,
    pub phase: Phase,
    pub pending: Vec<Intent>,
    pub thumbnails: Vec<ThumbSlot>,
}

/// One gallery widget.
#[derive(Debug)]
pub struct Gallery<H: GalleryHost> {
    cfg: Config,
    images: ImageList,
    store: Store<GalleryState>,
    queue: EventQueue<Intent>,
    gestures: GestureRecognizer,
    thumbs: Vec<ThumbSlot>,
    phase: Phase,
    ids: IdAllocator,
    events: EventLog,
    started: bool,
    host: H,
}

/// Store listener: the side effects of state writes.
struct Reactions<'a, H> {
    host: &'a mut H,
    images: &'a ImageList,
    thumbs: &'a [ThumbSlot],
    phase: &'a mut Phase,
    ids: &'a mut IdAllocator,
    events: &'a mut EventLog,
    from: usize,
    modality: Modality,
}

impl<H: GalleryHost> Listener<GalleryState> for Reactions<'_, H> {
    fn on_write(&mut self, store: &mut Store<GalleryState>, write: &GalleryWrite) {
        match write {
            GalleryWrite::CurrentImageIndex(_) => {
                self.update_counter(store);
                self.highlight_active(store);
                self.begin_load(store);
            }
            GalleryWrite::AllImagesLoaded(true) => {
                self.events.push(GalleryEvent::ThumbnailsReady {
                    count: store.img_thumb_amount,
                });
                self.update_counter(store);
                self.highlight_active(store);
            }
            GalleryWrite::IsMouseDown(active) => self.host.set_drag_tracking(*active),
            _ => {}
        }
    }
}

impl<H: GalleryHost> Reactions<'_, H> {
    fn update_counter(&mut self, store: &Store<GalleryState>) {
        self.host.set_counter_text(&store.counter_text());
    }

    /// Move the active marker to the current index. Thumbnails that have not
    /// settled yet cannot be highlighted; the first highlight happens once
    /// all of them have.
    fn highlight_active(&mut self, store: &mut Store<GalleryState>) {
        let index = store.current_image_index;
        let next = match self.thumbs.get(index) {
            Some(slot) if slot.is_settled() => Some(index),
            _ => None,
        };
        if let Some(prev) = store.active_thumbnail {
            if Some(prev) != next {
                self.host.set_thumbnail_active(prev, false);
            }
        }
        if let Some(i) = next {
            self.host.set_thumbnail_active(i, true);
        }
        if store.active_thumbnail != next {
            store.set(self, GalleryWrite::ActiveThumbnail(next));
        }
    }

    fn begin_load(&mut self, store: &Store<GalleryState>) {
        let ticket = self.ids.alloc_transition();
        let index = store.current_image_index;
        let outgoing = store.current_main_visual;
        *self.phase = Phase::Loading {
            ticket,
            index,
            outgoing,
            incoming: None,
        };
        log::debug!(
            "transition {ticket}: {} -> {index} ({}, {:?})",
            self.from,
            store.next_dir.as_str(),
            self.modality
        );
        self.events.push(GalleryEvent::TransitionStarted {
            ticket,
            from: self.from,
            to: index,
            direction: store.next_dir,
            modality: self.modality,
        });
        if let Some(image) = self.images.get(index) {
            self.host.request_main_visual(ticket, index, image);
        }
    }
}

impl<H: GalleryHost> Gallery<H> {
    pub fn new(images: ImageList, cfg: Config, host: H) -> Result<Self> {
        cfg.validate()?;
        let n = images.len();
        Ok(Self {
            queue: EventQueue::with_capacity(cfg.queue_capacity),
            gestures: GestureRecognizer::new(cfg.gestures.clone()),
            events: EventLog::new(cfg.max_events),
            store: Store::new(GalleryState::new(n)),
            thumbs: vec![ThumbSlot::Pending; n],
            phase: Phase::Idle,
            ids: IdAllocator::new(),
            started: false,
            images,
            cfg,
            host,
        })
    }

    fn split(
        &mut self,
        from: usize,
        modality: Modality,
    ) -> (&mut Store<GalleryState>, Reactions<'_, H>) {
        (
            &mut self.store,
            Reactions {
                host: &mut self.host,
                images: &self.images,
                thumbs: &self.thumbs,
                phase: &mut self.phase,
                ids: &mut self.ids,
                events: &mut self.events,
                from,
                modality,
            },
        )
    }

    fn write(&mut self, write: GalleryWrite) {
        let from = self.store.current_image_index;
        let (store, mut reactions) = self.split(from, Modality::Click);
        store.set(&mut reactions, write);
    }

    fn ensure_started(&self) -> Result<()> {
        if self.started {
            Ok(())
        } else {
            Err(GalleryError::NotStarted)
        }
    }

    fn unexpected(&self, ticket: TransitionId) -> GalleryError {
        let expected = match self.phase.ticket() {
            Some(t) => format!("{} for {t}", self.phase.name()),
            None => self.phase.name().to_string(),
        };
        log::warn!("stale completion for {ticket}; controller is {expected}");
        GalleryError::UnexpectedCompletion { ticket, expected }
    }

    /// Share the transition duration, insert and request every thumbnail, and
    /// load the first main visual.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(GalleryError::AlreadyStarted);
        }
        self.started = true;
        self.host
            .set_transition_duration(self.cfg.transition_duration());
        for (index, image) in self.images.iter().enumerate() {
            self.host.insert_thumbnail(index, image);
            self.host.request_thumbnail(index, image);
        }

        // The initial load is a transition without an outgoing visual.
        self.write(GalleryWrite::IsAnimating(true));
        let (store, mut reactions) = self.split(0, Modality::Startup);
        reactions.begin_load(store);
        Ok(())
    }

    // ---- thumbnails ----

    pub fn thumbnail_decoded(&mut self, index: usize) -> Result<()> {
        self.settle_thumbnail(index, ThumbSlot::Visible)?;
        self.host.set_thumbnail_visible(index, true);
        self.check_all_loaded();
        Ok(())
    }

    /// A thumbnail could not be decoded. It is replaced by a placeholder and
    /// still counts towards `all_images_loaded`.
    pub fn thumbnail_failed(&mut self, index: usize, reason: &str) -> Result<()> {
        self.settle_thumbnail(index, ThumbSlot::Placeholder)?;
        log::warn!("thumbnail {index} failed to load: {reason}");
        self.events.push(GalleryEvent::LoadFailed {
            ticket: None,
            index,
            reason: reason.to_string(),
        });
        self.host.show_thumbnail_placeholder(index);
        self.check_all_loaded();
        Ok(())
    }

    fn settle_thumbnail(&mut self, index: usize, slot: ThumbSlot) -> Result<()> {
        self.ensure_started()?;
        match self.thumbs.get_mut(index) {
            Some(current) if *current == ThumbSlot::Pending => {
                *current = slot;
                Ok(())
            }
            _ => Err(GalleryError::UnknownThumbnail(index)),
        }
    }

    fn check_all_loaded(&mut self) {
        let settled = self.thumbs.iter().filter(|s| s.is_settled()).count();
        if settled == self.store.img_thumb_amount && !self.store.all_images_loaded {
            self.write(GalleryWrite::AllImagesLoaded(true));
        }
    }

    // ---- intents ----

    pub fn click_thumbnail(&mut self, index: usize) -> Result<Dispatch> {
        self.ensure_started()?;
        if index >= self.images.len() {
            return Err(GalleryError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        Ok(self.dispatch(Intent::Thumbnail(index), Modality::Click))
    }

    pub fn click_prev(&mut self) -> Result<Dispatch> {
        self.navigate(Step::Prev, Modality::Click)
    }

    pub fn click_next(&mut self) -> Result<Dispatch> {
        self.navigate(Step::Next, Modality::Click)
    }

    /// Shared entry point for relative navigation from any input channel.
    pub fn navigate(&mut self, step: Step, modality: Modality) -> Result<Dispatch> {
        self.ensure_started()?;
        Ok(self.dispatch(Intent::Step(step), modality))
    }

    fn dispatch(&mut self, intent: Intent, modality: Modality) -> Dispatch {
        if let Intent::Thumbnail(i) = intent {
            if i == self.store.current_image_index {
                return Dispatch::Ignored;
            }
        }

        if self.store.is_animating {
            return match self.queue.enqueue(intent) {
                Enqueue::Queued { pending } => {
                    log::debug!("deferred {intent:?} from {modality:?} ({pending} pending)");
                    self.events
                        .push(GalleryEvent::IntentQueued { intent, pending });
                    Dispatch::Queued { pending }
                }
                Enqueue::Dropped => {
                    log::debug!("queue full, dropped {intent:?} from {modality:?}");
                    self.events.push(GalleryEvent::IntentDropped { intent });
                    Dispatch::Dropped
                }
            };
        }

        let from = self.store.current_image_index;
        let (to, dir) = match intent {
            Intent::Thumbnail(i) => (i, Direction::between(from, i)),
            Intent::Step(step) => (step.apply(from, self.images.len()), step.direction()),
        };

        let (store, mut reactions) = self.split(from, modality);
        store.set(&mut reactions, GalleryWrite::IsAnimating(true));
        store.set(&mut reactions, GalleryWrite::NextDir(dir));
        store.set(&mut reactions, GalleryWrite::CurrentImageIndex(to));

        match self.phase.ticket() {
            Some(ticket) => Dispatch::Accepted(ticket),
            None => Dispatch::Ignored,
        }
    }

    // ---- gestures ----

    pub fn touch_start(&mut self, x: f32) {
        self.gestures.touch_start(x);
    }

    pub fn touch_end(&mut self, x: f32, viewport_width: f32) -> Result<Dispatch> {
        self.ensure_started()?;
        match self.gestures.touch_end(x, viewport_width) {
            Some(step) => Ok(self.latched_step(step, Modality::Touch)),
            None => Ok(Dispatch::Ignored),
        }
    }

    /// Horizontal wheel input. Only counts when the event target lies in the
    /// main display region or its overlay.
    pub fn wheel(&mut self, delta_x: f32, in_main_region: bool) -> Result<Dispatch> {
        self.ensure_started()?;
        if self.store.is_touch_animation {
            return Ok(Dispatch::Suppressed);
        }
        if !in_main_region {
            return Ok(Dispatch::Ignored);
        }
        match self.gestures.wheel(delta_x) {
            Some(step) => Ok(self.latched_step(step, Modality::Wheel)),
            None => Ok(Dispatch::Ignored),
        }
    }

    fn latched_step(&mut self, step: Step, modality: Modality) -> Dispatch {
        if self.store.is_touch_animation {
            return Dispatch::Suppressed;
        }
        self.write(GalleryWrite::IsTouchAnimation(true));
        self.dispatch(Intent::Step(step), modality)
    }

    pub fn mouse_down(&mut self, x: f32, in_main_region: bool) -> Result<()> {
        self.ensure_started()?;
        if in_main_region {
            self.gestures.begin_drag(x);
            self.write(GalleryWrite::IsMouseDown(true));
        }
        Ok(())
    }

    pub fn mouse_move(&mut self, x: f32) -> Result<Dispatch> {
        self.ensure_started()?;
        if !self.store.is_mouse_down {
            return Ok(Dispatch::Ignored);
        }
        if self.store.has_mouse_animated {
            return Ok(Dispatch::Suppressed);
        }
        match self.gestures.drag_move(x) {
            Some(step) => {
                self.write(GalleryWrite::HasMouseAnimated(true));
                Ok(self.dispatch(Intent::Step(step), Modality::Drag))
            }
            None => Ok(Dispatch::Ignored),
        }
    }

    /// Mouse released anywhere on the page: stop tracking and reset the drag
    /// cycle. Valid before `start`.
    pub fn mouse_up(&mut self) {
        self.gestures.end_drag();
        if self.store.is_mouse_down {
            self.write(GalleryWrite::IsMouseDown(false));
        }
    }

    // ---- transition completions ----

    /// The main visual for `ticket` resolved. It is mounted with its entrance
    /// marker and becomes the current main visual while it decodes.
    pub fn main_visual_resolved(&mut self, ticket: TransitionId, visual: VisualId) -> Result<()> {
        let (index, outgoing) = match self.phase {
            Phase::Loading {
                ticket: t,
                index,
                outgoing,
                incoming: None,
            } if t == ticket => (index, outgoing),
            _ => return Err(self.unexpected(ticket)),
        };
        let dir = self.store.next_dir;
        if let Some(image) = self.images.get(index) {
            self.host.add_marker(visual, Marker::Enter(dir));
            self.host.mount_main_visual(visual, image);
        }
        self.phase = Phase::Loading {
            ticket,
            index,
            outgoing,
            incoming: Some(visual),
        };
        self.write(GalleryWrite::CurrentMainVisual(Some(visual)));
        self.events
            .push(GalleryEvent::VisualMounted { ticket, visual });
        Ok(())
    }

    /// The mounted visual finished decoding: bind the lightbox, start the
    /// fade-in and retire the outgoing visual.
    pub fn main_visual_ready(&mut self, ticket: TransitionId) -> Result<()> {
        let (index, outgoing, incoming) = match self.phase {
            Phase::Loading {
                ticket: t,
                index,
                outgoing,
                incoming: Some(incoming),
            } if t == ticket => (index, outgoing, incoming),
            _ => return Err(self.unexpected(ticket)),
        };
        let handle = self.host.build_lightbox(incoming);
        self.write(GalleryWrite::Lightbox(handle));
        self.host
            .remove_marker(incoming, Marker::Enter(self.store.next_dir));
        self.retire_outgoing(ticket, index, outgoing);
        Ok(())
    }

    /// The main visual for `ticket` could not be resolved or decoded. A
    /// placeholder takes its place and the transition completes normally;
    /// the placeholder becomes the current main visual and is retired by the
    /// next transition.
    pub fn main_visual_failed(&mut self, ticket: TransitionId, reason: &str) -> Result<()> {
        let (index, outgoing, incoming) = match self.phase {
            Phase::Loading {
                ticket: t,
                index,
                outgoing,
                incoming,
            } if t == ticket => (index, outgoing, incoming),
            _ => return Err(self.unexpected(ticket)),
        };
        log::warn!("transition {ticket}: image {index} failed to load: {reason}");
        if let Some(visual) = incoming {
            self.host.unmount_main_visual(visual);
        }
        let placeholder = match self.images.get(index) {
            Some(image) => self.host.show_main_placeholder(index, image),
            None => None,
        };
        self.write(GalleryWrite::CurrentMainVisual(placeholder));
        self.write(GalleryWrite::Lightbox(None));
        self.events.push(GalleryEvent::LoadFailed {
            ticket: Some(ticket),
            index,
            reason: reason.to_string(),
        });
        self.retire_outgoing(ticket, index, outgoing);
        Ok(())
    }

    fn retire_outgoing(&mut self, ticket: TransitionId, index: usize, outgoing: Option<VisualId>) {
        if let Some(active) = self.store.active_thumbnail {
            self.host.scroll_thumbnail_into_view(active);
        }
        match outgoing {
            Some(visual) => {
                self.host
                    .add_marker(visual, Marker::Exit(self.store.next_dir));
                self.phase = Phase::EnteringAndExiting {
                    ticket,
                    index,
                    outgoing: visual,
                };
                self.host
                    .await_exit(ticket, visual, self.cfg.transition_duration());
            }
            None => self.finish(ticket, index),
        }
    }

    /// The exit animation of the outgoing visual has run its course.
    pub fn exit_finished(&mut self, ticket: TransitionId) -> Result<()> {
        let (index, outgoing) = match self.phase {
            Phase::EnteringAndExiting {
                ticket: t,
                index,
                outgoing,
            } if t == ticket => (index, outgoing),
            _ => return Err(self.unexpected(ticket)),
        };
        self.host.unmount_main_visual(outgoing);
        self.finish(ticket, index);
        Ok(())
    }

    fn finish(&mut self, ticket: TransitionId, index: usize) {
        self.phase = Phase::Idle;
        self.write(GalleryWrite::IsAnimating(false));
        if self.store.is_touch_animation {
            self.write(GalleryWrite::IsTouchAnimation(false));
        }
        if self.store.has_mouse_animated {
            self.write(GalleryWrite::HasMouseAnimated(false));
        }
        if let Some(image) = self.images.get(index) {
            self.host.render_overlay(index, image);
        }
        log::debug!("transition {ticket} finished at {index}");
        self.events
            .push(GalleryEvent::TransitionFinished { ticket, index });
        self.run_event_queue();
    }

    /// Replay at most one deferred intent.
    fn run_event_queue(&mut self) {
        if let Some(intent) = self.queue.take_next() {
            self.events.push(GalleryEvent::IntentReplayed { intent });
            let outcome = self.dispatch(intent, Modality::Replay);
            log::debug!("replayed {intent:?}: {outcome:?}");
        }
    }

    // ---- lightbox ----

    /// Open the lightbox bound to the current main visual. Returns `false`
    /// when none is bound.
    pub fn open_lightbox(&mut self) -> bool {
        match self.store.lightbox {
            Some(handle) => {
                // each lightbox holds a single slide: the current visual
                self.host.open_lightbox(handle, 0);
                true
            }
            None => false,
        }
    }

    // ---- inspection ----

    pub fn state(&self) -> &GalleryState {
        self.store.record()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn pending_intents(&self) -> Vec<Intent> {
        self.queue.iter().copied().collect()
    }

    /// Intents discarded because the deferred queue was full.
    pub fn dropped_intents(&self) -> u64 {
        self.queue.dropped()
    }

    pub fn thumbnails(&self) -> &[ThumbSlot] {
        &self.thumbs
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of state writes applied so far, nested ones included.
    pub fn store_writes(&self) -> u64 {
        self.store.writes()
    }

    pub fn drain_events(&mut self) -> Vec<GalleryEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            state: self.store.record().clone(),
            phase: self.phase,
            pending: self.pending_intents(),
            thumbnails: self.thumbs.clone(),
        }
    }
}
