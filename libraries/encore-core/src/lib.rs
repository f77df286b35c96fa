//! Encore Core
//!
//! Platform-agnostic core types, traits, and error handling for Encore.
//!
//! This crate provides the foundational building blocks shared by the
//! playback, storage, and application crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Album`, `Playlist`, and their IDs
//! - **Track Catalog**: the read-only album/singles collection with search
//! - **Core Traits**: `KeyValueStore`
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use encore_core::catalog::Catalog;
//!
//! let catalog = Catalog::from_toml_str(r#"
//! [[singles]]
//! id = "05"
//! title = "05 - LOLA"
//! file = "music/05 - LOLA.mp3"
//! "#).unwrap();
//!
//! assert_eq!(catalog.search("lola").len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use error::{EncoreError, Result};
pub use traits::KeyValueStore;

pub use types::{
    Album, AlbumEntry, AlbumId, Playlist, PlaylistId, ResourceLocator, Track, TrackId,
};
