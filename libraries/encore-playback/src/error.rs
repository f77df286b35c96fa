//! Error types for playback management

use crate::engine::MediaControl;
use encore_core::ResourceLocator;
use thiserror::Error;

/// Usage errors, rejected before any session state changes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index {index} out of bounds for queue of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors reported by a media engine
///
/// The session contains these: they degrade playback, they are never
/// returned to callers of transport operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Resource could not be opened or decoded
    #[error("Failed to load {resource}: {reason}")]
    Load { resource: String, reason: String },

    /// Releasing a handle failed
    #[error("Failed to unload: {0}")]
    Unload(String),

    /// Play or pause was rejected
    #[error("{command} failed: {reason}")]
    Control {
        command: MediaControl,
        reason: String,
    },

    /// The handle was already unloaded
    #[error("Unknown or unloaded handle")]
    UnknownHandle,
}

impl EngineError {
    /// Create a load error for `resource`
    pub fn load(resource: &ResourceLocator, reason: impl ToString) -> Self {
        Self::Load {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a control error for `command`
    pub fn control(command: MediaControl, reason: impl ToString) -> Self {
        match command {
            MediaControl::Unload => Self::Unload(reason.to_string()),
            command => Self::Control {
                command,
                reason: reason.to_string(),
            },
        }
    }
}

/// Result type for queue and session operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
