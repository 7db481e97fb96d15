//! Core error types

use crate::catalog::ImageId;
use thiserror::Error;

/// Errors reported by session operations.
///
/// Every variant is recoverable: a failing operation leaves all session
/// state unchanged and the session stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ===== Batch loading =====
    #[error("no files were given")]
    EmptyInput,

    #[error("file \"{name}\" is not an image: {reason}")]
    NotAnImage { name: String, reason: String },

    // ===== Selection & ordering =====
    #[error("no image is selected")]
    EmptySelection,

    #[error("unknown image {0}")]
    UnknownImage(ImageId),

    #[error("position {index} cannot move within {len} slides")]
    OutOfRange { index: usize, len: usize },

    // ===== Playback =====
    #[error("interval {0}ms is below the 500ms minimum")]
    InvalidInterval(u64),

    #[error("no finalized selection to play")]
    NoSelection,
}

impl CoreError {
    /// Human-facing message for status display.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::EmptyInput => "Please select at least one image file.".to_string(),
            CoreError::NotAnImage { name, .. } => {
                format!("File \"{}\" is not an image file.", name)
            }
            CoreError::EmptySelection => {
                "Please select at least one image before finalizing.".to_string()
            }
            CoreError::UnknownImage(id) => format!("Unknown image {}.", id),
            CoreError::OutOfRange { .. } => "Cannot move the image any further.".to_string(),
            CoreError::InvalidInterval(_) => {
                "Please enter a valid delay (minimum 500ms).".to_string()
            }
            CoreError::NoSelection => "Please finalize your selection first.".to_string(),
        }
    }
}
