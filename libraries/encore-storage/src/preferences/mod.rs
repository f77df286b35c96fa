//! Persisted favorites and playlists
//!
//! Each collection is one JSON document in the key-value store:
//!
//! - [`FAVORITES_KEY`]: array of track titles, in insertion order
//! - [`PLAYLISTS_KEY`]: array of `{ id, name, songs, createdAt }` objects
//!
//! An absent key reads as an empty collection. Every mutation reads the whole
//! document, changes it, and writes it back; if the write fails the stored
//! document is left as it was.
//!
//! # Example
//!
//! ```rust
//! use encore_storage::{MemoryStore, Preferences};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let preferences = Preferences::new(Arc::new(MemoryStore::new()));
//!
//! assert!(preferences.toggle_favorite("05 - LOLA").await.unwrap());
//! assert!(preferences.is_favorite("05 - LOLA").await.unwrap());
//! # });
//! ```

mod favorites;
mod playlists;

use crate::error::PreferencesError;
use encore_core::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Store key of the favorites document
pub const FAVORITES_KEY: &str = "favorites";

/// Store key of the playlists document
pub const PLAYLISTS_KEY: &str = "playlists";

pub type Result<T> = std::result::Result<T, PreferencesError>;

/// Favorites and playlists backed by a key-value store
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Remove every favorite and playlist
    pub async fn reset(&self) -> Result<()> {
        self.store.remove(FAVORITES_KEY).await?;
        self.store.remove(PLAYLISTS_KEY).await?;
        Ok(())
    }

    /// Read a document, treating an absent key as empty
    async fn read<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.get(key).await? {
            None => Ok(T::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                warn!(key, error = %source, "Stored preferences document is corrupt");
                PreferencesError::Corrupt {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    async fn write<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value).map_err(encore_core::EncoreError::from)?;
        self.store.set(key, &raw).await?;
        Ok(())
    }
}
