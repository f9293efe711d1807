//! Error type shared by the gallery core.

use thiserror::Error;

use crate::ids::TransitionId;

/// Errors produced by the gallery controller and its data loaders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GalleryError {
    #[error("gallery has no images")]
    EmptyGallery,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("image index {index} out of range (gallery has {len} images)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("gallery already started")]
    AlreadyStarted,
    #[error("gallery not started")]
    NotStarted,
    #[error("unexpected completion for transition {ticket} (controller is {expected})")]
    UnexpectedCompletion {
        ticket: TransitionId,
        expected: String,
    },
    #[error("thumbnail {0} is not awaiting a decode")]
    UnknownThumbnail(usize),
    #[error("image list parse error: {0}")]
    ImageList(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
