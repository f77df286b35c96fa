/// Storage-specific errors
use encore_core::{EncoreError, PlaylistId};
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for EncoreError {
    fn from(err: StorageError) -> Self {
        EncoreError::storage(err.to_string())
    }
}

/// Errors from the favorites and playlists preferences
///
/// Usage errors (`EmptyName`, `PlaylistNotFound`, `TrackIndexOutOfBounds`)
/// are detected before anything is written.
#[derive(Error, Debug)]
pub enum PreferencesError {
    /// The underlying key-value store failed
    #[error(transparent)]
    Store(#[from] EncoreError),

    /// A stored document could not be parsed
    #[error("Stored {key} are corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Playlist name is empty after trimming
    #[error("Playlist name cannot be empty")]
    EmptyName,

    /// No playlist with this ID
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Track position outside the playlist
    #[error("Track index {index} out of bounds for playlist of length {len}")]
    TrackIndexOutOfBounds { index: usize, len: usize },
}
