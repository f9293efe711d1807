//! Galleria Core (host-agnostic)
//!
//! Interaction and transition state machine for an image gallery widget: a
//! thumbnail strip, a main display with crossfade transitions, directional
//! navigation from clicks, touch swipes, mouse drags and horizontal wheel
//! input, and an optional lightbox.
//!
//! The core performs no I/O. It drives a [`GalleryHost`] (image resolution,
//! display tree, lightbox) with requests and is told about completions
//! through methods on [`Gallery`]. Adapters (wasm) bridge this to a page.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gesture;
pub mod host;
pub mod ids;
pub mod images;
pub mod intent;
pub mod queue;
pub mod state;
pub mod store;

// Re-exports for consumers (adapters)
pub use config::{Config, GestureConfig, SwipeThreshold};
pub use controller::{Gallery, GallerySnapshot, ThumbSlot};
pub use error::{GalleryError, Result};
pub use events::{EventLog, GalleryEvent};
pub use gesture::{DragState, GestureRecognizer, TouchState};
pub use host::{DisplayTree, GalleryHost, ImageSource, Lightbox, Marker};
pub use ids::{IdAllocator, LightboxHandle, TransitionId, VisualId};
pub use images::{parse_image_list_json, ImageEntry, ImageList};
pub use intent::{Direction, Dispatch, Intent, Modality, Step};
pub use queue::{Enqueue, EventQueue};
pub use state::{GalleryField, GalleryState, GalleryWrite, Phase};
pub use store::{Listener, Record, Silent, Store};
