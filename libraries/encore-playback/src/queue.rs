//! Playback queue
//!
//! An ordered list of tracks plus a cursor. Navigation wraps around in both
//! directions:
//!
//! ```text
//! next = (current + 1) mod len
//! prev = (current - 1 + len) mod len
//! ```

use crate::error::{PlaybackError, Result};
use encore_core::{Track, TrackId};
use std::sync::Arc;

/// Ordered tracks with a cursor
///
/// Invariant: when the cursor is set, it indexes into `tracks`.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Arc<Track>>,
    current: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue and point the cursor at `start`
    ///
    /// Validation happens first: on error the queue is untouched.
    pub fn replace(&mut self, tracks: Vec<Arc<Track>>, start: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if start >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index: start,
                len: tracks.len(),
            });
        }

        self.tracks = tracks;
        self.current = Some(start);
        Ok(())
    }

    /// Append a track, returning its index
    pub fn push(&mut self, track: Arc<Track>) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Position of the first track with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    /// Move the cursor to `index`
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    /// Step the cursor forward with wrap-around
    ///
    /// Returns the new index, or `None` if the queue is empty. An unset cursor
    /// on a non-empty queue steps to the first track.
    pub fn advance(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        let next = self.current.map_or(0, |current| (current + 1) % len);
        self.current = Some(next);
        Some(next)
    }

    /// Step the cursor back with wrap-around
    ///
    /// Returns the new index, or `None` if the queue is empty. An unset cursor
    /// on a non-empty queue steps to the last track.
    pub fn retreat(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        let prev = self.current.map_or(len - 1, |current| (current + len - 1) % len);
        self.current = Some(prev);
        Some(prev)
    }

    /// Remove every track and unset the cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Arc<Track>> {
        self.current.and_then(|index| self.tracks.get(index))
    }

    /// Cursor position
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
