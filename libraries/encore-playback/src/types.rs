//! Core types for playback management

use encore_core::Track;
use std::sync::Arc;

/// Point-in-time view of the session
///
/// Derived from the queue and the live handle on every read; nothing here is
/// stored separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    /// Track under the queue cursor
    pub current_track: Option<Arc<Track>>,

    /// Queue cursor
    pub current_index: Option<usize>,

    /// Whether audio is playing
    pub is_playing: bool,

    /// Number of queued tracks
    pub queue_length: usize,

    /// Whether an engine handle is live
    pub is_loaded: bool,
}
