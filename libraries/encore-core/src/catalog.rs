//! Track catalog
//!
//! A fixed, read-only collection of tracks grouped into albums plus one
//! ungrouped collection ("singles"). Catalog files are TOML:
//!
//! ```toml
//! [[albums]]
//! id = "album1"
//! title = "Album Zielony"
//! cover = "covers/cover1.jpg"
//!
//! [[albums.songs]]
//! id = "01 - JESZCZE RAZ"
//! title = "01 - JESZCZE RAZ"
//! file = "music/01 - JESZCZE RAZ.mp3"
//!
//! [[singles]]
//! id = "06 - JOHNNY DANG"
//! title = "06 - JOHNNY DANG"
//! file = "music/06 - JOHNNY DANG.mp3"
//! ```

use crate::error::{EncoreError, Result};
use crate::types::{Album, AlbumEntry, AlbumId, Track, TrackId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    albums: Vec<AlbumEntry>,
    #[serde(default)]
    singles: Vec<Track>,
}

/// Read-only track catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<Album>,
    singles: Vec<Arc<Track>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate album or track IDs
    pub fn new(albums: Vec<Album>, singles: Vec<Arc<Track>>) -> Result<Self> {
        let mut album_ids = HashSet::new();
        for album in &albums {
            if !album_ids.insert(&album.id) {
                return Err(EncoreError::catalog(format!(
                    "duplicate album id: {}",
                    album.id
                )));
            }
        }

        let mut track_ids = HashSet::new();
        let all = albums.iter().flat_map(|a| a.tracks.iter()).chain(&singles);
        for track in all {
            if !track_ids.insert(&track.id) {
                return Err(EncoreError::catalog(format!(
                    "duplicate track id: {}",
                    track.id
                )));
            }
        }

        Ok(Self { albums, singles })
    }

    /// Parse a catalog from TOML text
    ///
    /// Resource locators are kept exactly as written.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::from_file(file, None)
    }

    /// Load a catalog file from disk
    ///
    /// Relative local locators are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&text)?;
        Self::from_file(file, path.parent())
    }

    fn from_file(file: CatalogFile, base: Option<&Path>) -> Result<Self> {
        let rebase = |track: Track| match base {
            Some(base) => track.rebased(base),
            None => track,
        };

        let albums = file
            .albums
            .into_iter()
            .map(|mut entry| {
                entry.songs = entry.songs.into_iter().map(rebase).collect();
                if let (Some(base), Some(cover)) = (base, entry.cover.as_ref()) {
                    entry.cover = Some(cover.rebased(base));
                }
                Album::from(entry)
            })
            .collect();
        let singles = file
            .singles
            .into_iter()
            .map(|track| Arc::new(rebase(track)))
            .collect();

        Self::new(albums, singles)
    }

    /// All albums, in catalog order
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Look up an album by ID
    pub fn album(&self, id: &AlbumId) -> Option<&Album> {
        self.albums.iter().find(|album| &album.id == id)
    }

    /// Tracks that belong to no album
    pub fn singles(&self) -> &[Arc<Track>] {
        &self.singles
    }

    /// Every track: album tracks in album order, then singles
    pub fn all_tracks(&self) -> Vec<Arc<Track>> {
        self.albums
            .iter()
            .flat_map(|album| album.tracks.iter())
            .chain(self.singles.iter())
            .cloned()
            .collect()
    }

    /// Look up a track by ID
    pub fn track(&self, id: &TrackId) -> Option<Arc<Track>> {
        self.all_tracks().into_iter().find(|track| &track.id == id)
    }

    /// Case-insensitive title substring search
    pub fn search(&self, query: &str) -> Vec<Arc<Track>> {
        self.all_tracks()
            .into_iter()
            .filter(|track| track.matches(query))
            .collect()
    }

    /// Tracks grouped by the artist prefix of their title
    ///
    /// Tracks whose title has no `" - "` separator are left out.
    pub fn artists(&self) -> BTreeMap<String, Vec<Arc<Track>>> {
        let mut artists: BTreeMap<String, Vec<Arc<Track>>> = BTreeMap::new();
        for track in self.all_tracks() {
            if let Some(artist) = track.artist() {
                artists.entry(artist.to_string()).or_default().push(track.clone());
            }
        }
        artists
    }

    /// Up to `count` distinct singles in random order
    pub fn random_singles<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Arc<Track>> {
        let mut picks = self.singles.clone();
        picks.shuffle(rng);
        picks.truncate(count);
        picks
    }

    /// Total number of tracks
    pub fn len(&self) -> usize {
        self.albums.iter().map(Album::len).sum::<usize>() + self.singles.len()
    }

    /// Whether the catalog has no tracks at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
