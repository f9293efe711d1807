#![allow(dead_code)]
//! Recording host and drivers shared by the integration tests.

use std::time::Duration;

use galleria_core::{
    Config, DisplayTree, Gallery, ImageEntry, ImageList, ImageSource, Lightbox, LightboxHandle,
    Marker, Phase, TransitionId, VisualId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    TransitionDuration(Duration),
    RequestThumbnail(usize),
    RequestMain { ticket: TransitionId, index: usize },
    InsertThumbnail(usize),
    ThumbnailVisible(usize, bool),
    ThumbnailPlaceholder(usize),
    ThumbnailActive(usize, bool),
    ScrollThumbnail(usize),
    Counter(String),
    Mount(VisualId),
    Unmount(VisualId),
    MainPlaceholder { index: usize, visual: VisualId },
    AddMarker(VisualId, Marker),
    RemoveMarker(VisualId, Marker),
    AwaitExit {
        ticket: TransitionId,
        visual: VisualId,
        duration: Duration,
    },
    Overlay { index: usize, title: String },
    DragTracking(bool),
    BuildLightbox(VisualId),
    OpenLightbox(LightboxHandle, usize),
}

#[derive(Debug)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub lightbox_enabled: bool,
    next_visual: u32,
    next_lightbox: u32,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            lightbox_enabled: true,
            next_visual: 100,
            next_lightbox: 1,
        }
    }
}

impl RecordingHost {
    pub fn alloc_visual(&mut self) -> VisualId {
        let v = VisualId(self.next_visual);
        self.next_visual += 1;
        v
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn counter_texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Counter(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn main_requests(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::RequestMain { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl ImageSource for RecordingHost {
    fn request_thumbnail(&mut self, index: usize, _image: &ImageEntry) {
        self.calls.push(HostCall::RequestThumbnail(index));
    }

    fn request_main_visual(&mut self, ticket: TransitionId, index: usize, _image: &ImageEntry) {
        self.calls.push(HostCall::RequestMain { ticket, index });
    }
}

impl DisplayTree for RecordingHost {
    fn set_transition_duration(&mut self, duration: Duration) {
        self.calls.push(HostCall::TransitionDuration(duration));
    }
    fn insert_thumbnail(&mut self, index: usize, _image: &ImageEntry) {
        self.calls.push(HostCall::InsertThumbnail(index));
    }
    fn set_thumbnail_visible(&mut self, index: usize, visible: bool) {
        self.calls.push(HostCall::ThumbnailVisible(index, visible));
    }
    fn show_thumbnail_placeholder(&mut self, index: usize) {
        self.calls.push(HostCall::ThumbnailPlaceholder(index));
    }
    fn set_thumbnail_active(&mut self, index: usize, active: bool) {
        self.calls.push(HostCall::ThumbnailActive(index, active));
    }
    fn scroll_thumbnail_into_view(&mut self, index: usize) {
        self.calls.push(HostCall::ScrollThumbnail(index));
    }
    fn set_counter_text(&mut self, text: &str) {
        self.calls.push(HostCall::Counter(text.to_string()));
    }
    fn mount_main_visual(&mut self, visual: VisualId, _image: &ImageEntry) {
        self.calls.push(HostCall::Mount(visual));
    }
    fn unmount_main_visual(&mut self, visual: VisualId) {
        self.calls.push(HostCall::Unmount(visual));
    }
    fn show_main_placeholder(&mut self, index: usize, _image: &ImageEntry) -> Option<VisualId> {
        let visual = self.alloc_visual();
        self.calls.push(HostCall::MainPlaceholder { index, visual });
        Some(visual)
    }
    fn add_marker(&mut self, visual: VisualId, marker: Marker) {
        self.calls.push(HostCall::AddMarker(visual, marker));
    }
    fn remove_marker(&mut self, visual: VisualId, marker: Marker) {
        self.calls.push(HostCall::RemoveMarker(visual, marker));
    }
    fn await_exit(&mut self, ticket: TransitionId, visual: VisualId, duration: Duration) {
        self.calls.push(HostCall::AwaitExit {
            ticket,
            visual,
            duration,
        });
    }
    fn render_overlay(&mut self, index: usize, image: &ImageEntry) {
        self.calls.push(HostCall::Overlay {
            index,
            title: image.title.clone(),
        });
    }
    fn set_drag_tracking(&mut self, active: bool) {
        self.calls.push(HostCall::DragTracking(active));
    }
}

impl Lightbox for RecordingHost {
    fn build_lightbox(&mut self, visual: VisualId) -> Option<LightboxHandle> {
        self.calls.push(HostCall::BuildLightbox(visual));
        if !self.lightbox_enabled {
            return None;
        }
        let h = LightboxHandle(self.next_lightbox);
        self.next_lightbox += 1;
        Some(h)
    }

    fn open_lightbox(&mut self, handle: LightboxHandle, slide: usize) {
        self.calls.push(HostCall::OpenLightbox(handle, slide));
    }
}

pub fn images(n: usize) -> ImageList {
    let entries = (0..n)
        .map(|i| {
            ImageEntry::new(format!("img-{i}"), format!("alt {i}"))
                .with_caption(format!("Title {}", i + 1), "Description")
        })
        .collect();
    ImageList::new(entries).expect("non-empty image list")
}

/// A started gallery of `n` images, default config.
pub fn started(n: usize) -> Gallery<RecordingHost> {
    started_with(n, Config::default())
}

pub fn started_with(n: usize, cfg: Config) -> Gallery<RecordingHost> {
    let mut g = Gallery::new(images(n), cfg, RecordingHost::default()).expect("gallery builds");
    g.start().expect("gallery starts");
    g
}

/// A started gallery whose initial load has completed and whose host log is
/// empty.
pub fn idle(n: usize) -> Gallery<RecordingHost> {
    let mut g = started(n);
    settle(&mut g);
    g.host_mut().take_calls();
    g.drain_events();
    g
}

/// Drive one step of the in-flight transition. Returns false when idle.
pub fn advance(g: &mut Gallery<RecordingHost>) -> bool {
    match g.phase() {
        Phase::Idle => false,
        Phase::Loading {
            ticket,
            incoming: None,
            ..
        } => {
            let visual = g.host_mut().alloc_visual();
            g.main_visual_resolved(ticket, visual).expect("resolve");
            true
        }
        Phase::Loading { ticket, .. } => {
            g.main_visual_ready(ticket).expect("ready");
            true
        }
        Phase::EnteringAndExiting { ticket, .. } => {
            g.exit_finished(ticket).expect("exit");
            true
        }
    }
}

/// Complete exactly the transition currently in flight (a replayed intent may
/// leave a new one running).
pub fn settle(g: &mut Gallery<RecordingHost>) {
    let Some(ticket) = g.phase().ticket() else {
        return;
    };
    while g.phase().ticket() == Some(ticket) {
        advance(g);
    }
}

/// Complete transitions until the gallery is idle.
pub fn settle_all(g: &mut Gallery<RecordingHost>) {
    while advance(g) {}
}

/// Decode every pending thumbnail.
pub fn load_thumbnails(g: &mut Gallery<RecordingHost>) {
    for i in 0..g.images().len() {
        g.thumbnail_decoded(i).expect("thumbnail decode");
    }
}
