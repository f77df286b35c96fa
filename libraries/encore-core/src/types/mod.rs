mod album;
mod ids;
mod playlist;
mod track;

pub use album::{Album, AlbumEntry};
pub use ids::{AlbumId, PlaylistId, TrackId};
pub use playlist::Playlist;
pub use track::{ResourceLocator, Track};
