//! User playlists

use super::{Preferences, Result, PLAYLISTS_KEY};
use crate::error::PreferencesError;
use chrono::Utc;
use encore_core::{Playlist, PlaylistId, Track};
use tracing::info;

impl Preferences {
    /// All playlists in creation order
    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        self.read(PLAYLISTS_KEY).await
    }

    pub async fn playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        Ok(self.playlists().await?.into_iter().find(|p| &p.id == id))
    }

    /// Create an empty playlist named `name` (trimmed)
    ///
    /// The ID is the creation time in Unix milliseconds, bumped past the
    /// newest existing ID so two playlists created in the same millisecond
    /// stay distinct.
    pub async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let name = valid_name(name)?;
        let mut playlists = self.playlists().await?;

        let now = Utc::now();
        let newest = playlists.iter().filter_map(|p| p.id.millis()).max();
        let millis = match newest {
            Some(newest) if newest >= now.timestamp_millis() => newest + 1,
            _ => now.timestamp_millis(),
        };

        let playlist = Playlist::with_id(PlaylistId::from_millis(millis), name, now);
        playlists.push(playlist.clone());
        self.write(PLAYLISTS_KEY, &playlists).await?;

        info!(id = %playlist.id, name = %playlist.name, "Created playlist");
        Ok(playlist)
    }

    pub async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()> {
        let name = valid_name(name)?;
        self.modify(id, |playlist| {
            playlist.name = name.to_string();
            Ok(())
        })
        .await
    }

    /// Append `tracks` in order; duplicates are allowed
    ///
    /// Returns the new playlist length.
    pub async fn add_tracks(
        &self,
        id: &PlaylistId,
        tracks: impl IntoIterator<Item = Track>,
    ) -> Result<usize> {
        self.modify(id, |playlist| {
            playlist.tracks.extend(tracks);
            Ok(playlist.tracks.len())
        })
        .await
    }

    /// Remove the track at `index` and return it
    pub async fn remove_track(&self, id: &PlaylistId, index: usize) -> Result<Track> {
        self.modify(id, |playlist| {
            let len = playlist.tracks.len();
            if index >= len {
                return Err(PreferencesError::TrackIndexOutOfBounds { index, len });
            }
            Ok(playlist.tracks.remove(index))
        })
        .await
    }

    /// Delete a playlist and return it
    pub async fn delete_playlist(&self, id: &PlaylistId) -> Result<Playlist> {
        let mut playlists = self.playlists().await?;
        let index = playlists
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| PreferencesError::PlaylistNotFound(id.clone()))?;

        let removed = playlists.remove(index);
        self.write(PLAYLISTS_KEY, &playlists).await?;

        info!(id = %removed.id, "Deleted playlist");
        Ok(removed)
    }

    /// Read-modify-write one playlist; nothing is written if `f` fails
    async fn modify<R>(
        &self,
        id: &PlaylistId,
        f: impl FnOnce(&mut Playlist) -> Result<R>,
    ) -> Result<R> {
        let mut playlists = self.playlists().await?;
        let playlist = playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PreferencesError::PlaylistNotFound(id.clone()))?;

        let result = f(playlist)?;
        self.write(PLAYLISTS_KEY, &playlists).await?;
        Ok(result)
    }
}

fn valid_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PreferencesError::EmptyName);
    }
    Ok(name)
}
