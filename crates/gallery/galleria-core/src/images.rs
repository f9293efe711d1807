//! Image list data model.
//!
//! The list is ordered, fixed-length and read-only for the lifetime of a
//! gallery. Entries accept both the long field names and the short keys used
//! by hand-written image tables (`src`, `alt`, `type`).

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Reference handed to the image-resolution collaborator.
    #[serde(alias = "src")]
    pub reference: String,
    #[serde(alias = "alt", default)]
    pub alt_text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Optional source format hint (e.g. `webp`).
    #[serde(alias = "type", default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ImageEntry {
    pub fn new(reference: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            alt_text: alt_text.into(),
            title: String::new(),
            description: String::new(),
            format: None,
        }
    }

    pub fn with_caption(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.title = title.into();
        self.description = description.into();
        self
    }
}

/// Non-empty ordered list of images.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageList {
    entries: Vec<ImageEntry>,
}

impl ImageList {
    pub fn new(entries: Vec<ImageEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(GalleryError::EmptyGallery);
        }
        Ok(Self { entries })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }
}

impl<'de> Deserialize<'de> for ImageList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<ImageEntry>::deserialize(deserializer)?;
        ImageList::new(entries).map_err(serde::de::Error::custom)
    }
}

/// Parse an image list from a JSON array of entries.
pub fn parse_image_list_json(s: &str) -> Result<ImageList> {
    serde_json::from_str(s).map_err(|e| GalleryError::ImageList(e.to_string()))
}
