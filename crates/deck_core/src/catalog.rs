//! Image catalog: loaded images and their selection flags

use crate::error::CoreError;
use std::fmt;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// Stable identifier for a loaded image.
///
/// Assigned monotonically at append time and never reused within a session,
/// so an id stays unambiguous even across catalog reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A loaded image and its selection flag.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub id: ImageId,
    pub name: String,
    /// Raw byte payload, shared between the catalog and playlist snapshots.
    pub data: Arc<[u8]>,
    /// xxh3 of the payload, for cheap identity checks.
    pub content_hash: u64,
    pub selected: bool,
}

/// Ordered collection of loaded images.
///
/// Insertion order is the completion order of the load batch.
#[derive(Debug, Default)]
pub struct ImageCatalog {
    entries: Vec<ImageEntry>,
    next_id: u64,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated image. New entries start unselected.
    pub fn insert(&mut self, name: String, data: Vec<u8>) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;

        let content_hash = xxh3_64(&data);
        self.entries.push(ImageEntry {
            id,
            name,
            data: Arc::from(data),
            content_hash,
            selected: false,
        });
        id
    }

    /// Flip the selection flag of one image. Returns the new flag value.
    pub fn toggle_selection(&mut self, id: ImageId) -> Result<bool, CoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CoreError::UnknownImage(id))?;

        entry.selected = !entry.selected;
        Ok(entry.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    /// Snapshot of the selected entries, preserving catalog order.
    pub fn selected_entries(&self) -> Vec<ImageEntry> {
        self.entries.iter().filter(|e| e.selected).cloned().collect()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. The id counter keeps running so ids from a previous
    /// batch never alias into the new one.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Validate that a payload is image data.
///
/// The declared media type (when the source knows one) must be an `image/*`
/// type, and the payload magic must be a format the `image` crate
/// recognizes.
pub fn probe_image(name: &str, mime: Option<&str>, data: &[u8]) -> Result<(), CoreError> {
    if let Some(mime) = mime {
        if !mime.starts_with("image/") {
            return Err(CoreError::NotAnImage {
                name: name.to_string(),
                reason: format!("media type {} is not an image type", mime),
            });
        }
    }

    image::guess_format(data)
        .map(|_| ())
        .map_err(|e| CoreError::NotAnImage {
            name: name.to_string(),
            reason: e.to_string(),
        })
}
