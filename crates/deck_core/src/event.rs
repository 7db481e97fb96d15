//! Session event contract for UI layers

use crate::catalog::{ImageEntry, ImageId};
use tokio::sync::mpsc;

/// Events the session emits for rendering layers.
///
/// Fire-and-forget: the session never waits on a consumer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A file finished loading and was appended to the catalog.
    ImageLoaded { id: ImageId, name: String },

    /// A file was rejected during a batch load.
    ImageRejected { name: String, reason: String },

    /// Every unit of a load batch has completed.
    BatchComplete { loaded: usize, rejected: usize },

    /// The number of selected catalog images changed.
    SelectionChanged { selected: usize },

    /// The playlist was rebuilt or reordered.
    OrderChanged { slides: Vec<ImageEntry> },

    /// The playback cursor moved.
    SlideChanged { index: usize, total: usize },

    /// Human-facing status line.
    Status { text: String, is_error: bool },
}

/// Sending half of the session event channel.
///
/// Sends never block. If the receiving side is gone the event is dropped.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

/// Create the session event channel.
pub fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<SessionEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

impl EventSender {
    pub fn emit(&self, event: SessionEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("session event receiver dropped");
        }
    }

    pub fn status(&self, text: impl Into<String>) {
        self.emit(SessionEvent::Status {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&self, text: impl Into<String>) {
        self.emit(SessionEvent::Status {
            text: text.into(),
            is_error: true,
        });
    }
}
