//! Slideshow session: owns the catalog, playlist, and cursor

use crate::catalog::{probe_image, ImageCatalog, ImageEntry, ImageId};
use crate::error::CoreError;
use crate::event::{EventSender, SessionEvent};
use crate::playlist::{Direction, Playlist};
use crate::slideshow::{PlaybackState, SlideCursor, TimerTask};
use crate::source::FileSource;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};

/// Outcome of a completed load batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub loaded: usize,
    pub rejected: usize,
}

/// Everything the session owns, behind one lock.
#[derive(Default)]
struct SessionInner {
    catalog: ImageCatalog,
    playlist: Option<Playlist>,
    cursor: SlideCursor,
}

/// The application session: explicit owner of all slideshow state.
///
/// Cheap to clone; clones share the same state. Apart from `load_files`,
/// which awaits its batch of reads, every operation returns synchronously —
/// only the next timer tick is ever deferred. Requires a tokio runtime for
/// loading and playback.
#[derive(Clone)]
pub struct SlideshowSession {
    inner: Arc<RwLock<SessionInner>>,
    events: EventSender,
}

impl SlideshowSession {
    pub fn new(events: EventSender) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner::default())),
            events,
        }
    }

    // ===== Batch loading =====

    /// Load a batch of files, replacing the entire session state.
    ///
    /// Each source is read as an independent task; completions append to the
    /// catalog in completion order. Invalid or unreadable sources are
    /// reported individually and do not abort their siblings. Emits
    /// `BatchComplete` once every unit has finished.
    pub async fn load_files(
        &self,
        sources: Vec<Box<dyn FileSource>>,
    ) -> Result<BatchSummary, CoreError> {
        if sources.is_empty() {
            self.events.error(CoreError::EmptyInput.user_message());
            return Err(CoreError::EmptyInput);
        }

        // A fresh load invalidates everything downstream.
        {
            let mut inner = self.inner.write();
            inner.cursor.disarm();
            inner.cursor.reset();
            inner.playlist = None;
            inner.catalog.clear();
        }

        let mut reads = JoinSet::new();
        for source in sources {
            reads.spawn(async move {
                let payload = source.read().await;
                (source, payload)
            });
        }

        let mut loaded = 0;
        let mut rejected = 0;
        while let Some(joined) = reads.join_next().await {
            let Ok((source, payload)) = joined else {
                // A panicked read task still counts as a completed unit.
                rejected += 1;
                continue;
            };

            let name = source.name().to_string();
            match payload {
                Ok(data) => match probe_image(&name, source.mime_type(), &data) {
                    Ok(()) => {
                        let id = self.inner.write().catalog.insert(name.clone(), data);
                        loaded += 1;
                        self.events.emit(SessionEvent::ImageLoaded { id, name });
                    }
                    Err(err) => {
                        rejected += 1;
                        self.events.error(err.user_message());
                        self.events.emit(SessionEvent::ImageRejected {
                            name,
                            reason: err.to_string(),
                        });
                    }
                },
                Err(io_err) => {
                    rejected += 1;
                    self.events
                        .error(format!("Error reading file \"{}\".", name));
                    self.events.emit(SessionEvent::ImageRejected {
                        name,
                        reason: io_err.to_string(),
                    });
                }
            }
        }

        tracing::info!(loaded, rejected, "load batch complete");
        self.events
            .emit(SessionEvent::BatchComplete { loaded, rejected });
        self.events.emit(SessionEvent::SelectionChanged { selected: 0 });
        self.events.status(format!(
            "Successfully loaded {} image{}.",
            loaded,
            plural(loaded)
        ));

        Ok(BatchSummary { loaded, rejected })
    }

    // ===== Selection =====

    /// Flip the selection flag of one catalog image.
    pub fn toggle_selection(&self, id: ImageId) -> Result<bool, CoreError> {
        let mut inner = self.inner.write();
        match inner.catalog.toggle_selection(id) {
            Ok(selected) => {
                let count = inner.catalog.selected_count();
                self.events.emit(SessionEvent::SelectionChanged { selected: count });
                Ok(selected)
            }
            Err(err) => {
                self.events.error(err.user_message());
                Err(err)
            }
        }
    }

    pub fn selected_count(&self) -> usize {
        self.inner.read().catalog.selected_count()
    }

    // ===== Finalize & reorder =====

    /// Snapshot the current selection into a fresh playlist.
    ///
    /// On failure the previous playlist and cursor are left untouched; on
    /// success any running show is stopped and the cursor rests on slide 0.
    pub fn finalize(&self) -> Result<Vec<ImageEntry>, CoreError> {
        let mut inner = self.inner.write();
        let playlist = match Playlist::from_catalog(&inner.catalog) {
            Ok(playlist) => playlist,
            Err(err) => {
                self.events.error(err.user_message());
                return Err(err);
            }
        };

        // Stop any running show before swapping the order underneath it.
        inner.cursor.disarm();

        let slides = playlist.slides().to_vec();
        let total = playlist.len();
        inner.playlist = Some(playlist);
        inner.cursor.init();

        self.events.emit(SessionEvent::OrderChanged {
            slides: slides.clone(),
        });
        self.events.emit(SessionEvent::SlideChanged { index: 0, total });
        self.events.status(format!(
            "Finalized selection of {} image{}.",
            total,
            plural(total)
        ));

        Ok(slides)
    }

    /// Swap the playlist slide at `index` with its neighbour.
    pub fn move_slide(&self, index: usize, direction: Direction) -> Result<(), CoreError> {
        let mut inner = self.inner.write();
        let len = inner.playlist.as_ref().map_or(0, Playlist::len);
        let result = match inner.playlist.as_mut() {
            Some(playlist) => playlist.move_slide(index, direction),
            None => Err(CoreError::OutOfRange { index, len }),
        };

        match result {
            Ok(()) => {
                let slides = inner
                    .playlist
                    .as_ref()
                    .map(|p| p.slides().to_vec())
                    .unwrap_or_default();
                self.events.emit(SessionEvent::OrderChanged { slides });
                self.events.status(format!(
                    "Moved image {}.",
                    match direction {
                        Direction::Back => "up",
                        Direction::Forward => "down",
                    }
                ));
                Ok(())
            }
            Err(err) => {
                self.events.error(err.user_message());
                Err(err)
            }
        }
    }

    // ===== Playback =====

    /// Step the cursor one slide in `direction`, wrapping at both ends.
    ///
    /// While running, the timer is re-armed so the next auto-advance gets a
    /// full fresh interval.
    pub fn navigate(&self, direction: Direction) -> Result<usize, CoreError> {
        let mut inner = self.inner.write();
        let Some(len) = inner.playlist.as_ref().map(Playlist::len) else {
            self.events.error(CoreError::NoSelection.user_message());
            return Err(CoreError::NoSelection);
        };

        let index = inner.cursor.step(direction, len);
        self.events.emit(SessionEvent::SlideChanged { index, total: len });

        if inner.cursor.is_running() {
            let interval = inner.cursor.interval();
            inner.cursor.disarm();
            self.arm_timer(&mut inner, interval);
        }

        Ok(index)
    }

    /// Start periodic advancing every `interval_ms` milliseconds.
    ///
    /// Any previously armed timer is torn down first; at most one timer task
    /// is ever live.
    pub fn start(&self, interval_ms: u64) -> Result<(), CoreError> {
        let interval = match SlideCursor::validate_interval(interval_ms) {
            Ok(interval) => interval,
            Err(err) => {
                self.events.error(err.user_message());
                return Err(err);
            }
        };

        let mut inner = self.inner.write();
        if inner.playlist.is_none() {
            self.events.error(CoreError::NoSelection.user_message());
            return Err(CoreError::NoSelection);
        }

        inner.cursor.disarm();
        self.arm_timer(&mut inner, interval);
        tracing::debug!(interval_ms, "slideshow started");
        self.events.status("Slideshow started.");
        Ok(())
    }

    /// Stop periodic advancing. A no-op when nothing is running.
    pub fn stop(&self) {
        let mut inner = self.inner.write();
        inner.cursor.disarm();
        self.events.status("Slideshow stopped.");
    }

    fn arm_timer(&self, inner: &mut SessionInner, interval: Duration) {
        let epoch = inner.cursor.epoch();
        let weak = Arc::downgrade(&self.inner);
        let events = self.events.clone();

        // The interval runs from the arm call, not from the task's first
        // poll.
        let first_tick = time::Instant::now() + interval;
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(shared) = weak.upgrade() else { return };
                let mut inner = shared.write();

                // A stop, restart, finalize, or reload happened since this
                // task was armed; it no longer owns the cursor.
                if !inner.cursor.tick_is_current(epoch) {
                    return;
                }

                let Some(len) = inner.playlist.as_ref().map(Playlist::len) else {
                    return;
                };
                let index = inner.cursor.step(Direction::Forward, len);
                events.emit(SessionEvent::SlideChanged { index, total: len });
            }
        });

        inner.cursor.arm(TimerTask { handle, epoch }, interval);
    }

    // ===== Accessors =====

    pub fn catalog_entries(&self) -> Vec<ImageEntry> {
        self.inner.read().catalog.entries().to_vec()
    }

    pub fn catalog_len(&self) -> usize {
        self.inner.read().catalog.len()
    }

    pub fn playlist_slides(&self) -> Vec<ImageEntry> {
        self.inner
            .read()
            .playlist
            .as_ref()
            .map(|p| p.slides().to_vec())
            .unwrap_or_default()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.inner.read().cursor.state()
    }

    /// The slide under the cursor, with its position.
    pub fn current_slide(&self) -> Option<(usize, ImageEntry)> {
        let inner = self.inner.read();
        let playlist = inner.playlist.as_ref()?;
        let index = inner.cursor.index();
        playlist.get(index).map(|entry| (index, entry.clone()))
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
