/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque pointer to an audio or artwork resource
///
/// Either a local file path or a remote URL. The media engine decides how to
/// open it; the rest of the system only passes it around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLocator(String);

impl ResourceLocator {
    /// Create a locator from a path or URL string
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Create a locator for a local file
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().into_owned())
    }

    /// Whether this points at a network resource
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Local file path, if this is not a remote locator
    pub fn as_path(&self) -> Option<&Path> {
        if self.is_remote() {
            None
        } else {
            Some(Path::new(&self.0))
        }
    }

    /// Resolve a relative local path against `base`
    ///
    /// Remote and absolute locators are returned unchanged.
    pub fn rebased(&self, base: &Path) -> Self {
        match self.as_path() {
            Some(path) if path.is_relative() => Self::from_path(base.join(path)),
            _ => self.clone(),
        }
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PathBuf> for ResourceLocator {
    fn from(path: PathBuf) -> Self {
        Self::from_path(path)
    }
}

/// Audio track
///
/// Immutable once constructed. The catalog owns tracks behind `Arc` and every
/// other component references them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Audio resource
    #[serde(rename = "file")]
    pub audio: ResourceLocator,

    /// Cover artwork, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<ResourceLocator>,
}

impl Track {
    /// Create a new track without artwork
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        audio: ResourceLocator,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            audio,
            cover: None,
        }
    }

    /// Attach cover artwork
    pub fn with_cover(mut self, cover: ResourceLocator) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Artist part of a `"<artist> - <name>"` title
    pub fn artist(&self) -> Option<&str> {
        self.title.split_once(" - ").map(|(artist, _)| artist)
    }

    /// Case-insensitive title substring match
    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }

    pub(crate) fn rebased(mut self, base: &Path) -> Self {
        self.audio = self.audio.rebased(base);
        self.cover = self.cover.map(|cover| cover.rebased(base));
        self
    }
}
