//! Playback playlist: the finalized, reorderable selection

use crate::catalog::{ImageCatalog, ImageEntry};
use crate::error::CoreError;

/// Direction of a positional move or a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    /// Signed step, -1 or +1.
    pub fn delta(self) -> isize {
        match self {
            Direction::Back => -1,
            Direction::Forward => 1,
        }
    }
}

/// Ordered snapshot of the selected images at finalize time.
///
/// Independent of the catalog once built: later selection toggles do not
/// touch an existing playlist.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    slides: Vec<ImageEntry>,
}

impl Playlist {
    /// Snapshot the selected entries of a catalog, preserving catalog order.
    pub fn from_catalog(catalog: &ImageCatalog) -> Result<Self, CoreError> {
        let slides = catalog.selected_entries();
        if slides.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        Ok(Self { slides })
    }

    /// Swap the slide at `index` with its neighbour in `direction`.
    ///
    /// Length and slide identity are invariant; only positions change.
    pub fn move_slide(&mut self, index: usize, direction: Direction) -> Result<(), CoreError> {
        let len = self.slides.len();
        let target = index as isize + direction.delta();

        if index >= len || target < 0 || target as usize >= len {
            return Err(CoreError::OutOfRange { index, len });
        }

        self.slides.swap(index, target as usize);
        Ok(())
    }

    pub fn slides(&self) -> &[ImageEntry] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageId;
    use crate::test_support::PNG_BYTES;

    fn catalog_of(names: &[&str]) -> ImageCatalog {
        let mut catalog = ImageCatalog::new();
        for name in names {
            catalog.insert(name.to_string(), PNG_BYTES.to_vec());
        }
        catalog
    }

    fn ids(playlist: &Playlist) -> Vec<ImageId> {
        playlist.slides().iter().map(|e| e.id).collect()
    }

    #[test]
    fn snapshot_filters_and_preserves_catalog_order() {
        let mut catalog = catalog_of(&["a.png", "b.png", "c.png"]);
        catalog.toggle_selection(ImageId(2)).unwrap();
        catalog.toggle_selection(ImageId(0)).unwrap();

        let playlist = Playlist::from_catalog(&catalog).unwrap();
        assert_eq!(ids(&playlist), vec![ImageId(0), ImageId(2)]);
    }

    #[test]
    fn snapshot_of_empty_selection_fails() {
        let catalog = catalog_of(&["a.png"]);
        assert_eq!(
            Playlist::from_catalog(&catalog).unwrap_err(),
            CoreError::EmptySelection
        );
    }

    #[test]
    fn snapshot_is_decoupled_from_later_toggles() {
        let mut catalog = catalog_of(&["a.png", "b.png"]);
        catalog.toggle_selection(ImageId(0)).unwrap();

        let playlist = Playlist::from_catalog(&catalog).unwrap();
        catalog.toggle_selection(ImageId(0)).unwrap();
        catalog.toggle_selection(ImageId(1)).unwrap();

        assert_eq!(ids(&playlist), vec![ImageId(0)]);
    }

    #[test]
    fn move_swaps_neighbours() {
        let mut catalog = catalog_of(&["a.png", "b.png", "c.png"]);
        for i in 0..3 {
            catalog.toggle_selection(ImageId(i)).unwrap();
        }
        let mut playlist = Playlist::from_catalog(&catalog).unwrap();

        playlist.move_slide(0, Direction::Forward).unwrap();
        assert_eq!(ids(&playlist), vec![ImageId(1), ImageId(0), ImageId(2)]);

        // Moving the swapped slide back restores the original order.
        playlist.move_slide(1, Direction::Back).unwrap();
        assert_eq!(ids(&playlist), vec![ImageId(0), ImageId(1), ImageId(2)]);
    }

    #[test]
    fn move_preserves_length_and_identity() {
        let mut catalog = catalog_of(&["a.png", "b.png", "c.png"]);
        for i in 0..3 {
            catalog.toggle_selection(ImageId(i)).unwrap();
        }
        let mut playlist = Playlist::from_catalog(&catalog).unwrap();
        let mut before = ids(&playlist);
        before.sort();

        playlist.move_slide(1, Direction::Forward).unwrap();
        playlist.move_slide(0, Direction::Forward).unwrap();

        let mut after = ids(&playlist);
        after.sort();
        assert_eq!(playlist.len(), 3);
        assert_eq!(before, after);
    }

    #[test]
    fn move_out_of_range_is_a_clean_no_op() {
        let mut catalog = catalog_of(&["a.png", "b.png"]);
        catalog.toggle_selection(ImageId(0)).unwrap();
        catalog.toggle_selection(ImageId(1)).unwrap();
        let mut playlist = Playlist::from_catalog(&catalog).unwrap();
        let before = ids(&playlist);

        assert!(matches!(
            playlist.move_slide(0, Direction::Back),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            playlist.move_slide(1, Direction::Forward),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            playlist.move_slide(5, Direction::Back),
            Err(CoreError::OutOfRange { .. })
        ));
        assert_eq!(ids(&playlist), before);
    }
}
