/// Playlist domain types
use crate::types::{PlaylistId, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User playlist
///
/// Serialized in the shape the preferences store keeps it:
/// `{ id, name, songs, createdAt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name (trimmed, never empty)
    pub name: String,

    /// Ordered tracks; duplicates are allowed
    #[serde(rename = "songs", default)]
    pub tracks: Vec<Track>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn with_id(id: PlaylistId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            tracks: Vec::new(),
            created_at,
        }
    }
}
