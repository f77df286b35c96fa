//! Album types

use super::{AlbumId, Track};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An album: a titled, ordered group of tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Unique album identifier
    pub id: AlbumId,
    /// Album title
    pub title: String,
    /// Album artwork
    pub cover: Option<super::ResourceLocator>,
    /// Tracks in album order
    pub tracks: Vec<Arc<Track>>,
}

impl Album {
    /// Number of tracks on the album
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the album has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Album as written in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumEntry {
    /// Unique album identifier
    pub id: AlbumId,
    /// Album title
    pub title: String,
    /// Album artwork
    #[serde(default)]
    pub cover: Option<super::ResourceLocator>,
    /// Tracks in album order
    #[serde(default)]
    pub songs: Vec<Track>,
}

impl From<AlbumEntry> for Album {
    fn from(entry: AlbumEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            cover: entry.cover,
            tracks: entry.songs.into_iter().map(Arc::new).collect(),
        }
    }
}
