//! Encore - Playback Session Management
//!
//! Platform-agnostic playback session for Encore.
//!
//! This crate provides:
//! - A queue of tracks with a cursor and wrap-around navigation
//! - A single-handle transition protocol (unload, load, play)
//! - Auto-advance when the live track finishes
//! - Subscriber notifications for every session state change
//!
//! # Architecture
//!
//! `encore-playback` never touches audio directly. Decoding and output are
//! provided by a [`MediaEngine`] implementation; the session only loads,
//! controls, and unloads opaque handles and reacts to their status streams.
//! [`SilentEngine`] is a headless engine for terminals and tests.
//!
//! # Example
//!
//! ```rust
//! use encore_core::{ResourceLocator, Track};
//! use encore_playback::{PlaybackSession, SilentEngine};
//! use std::sync::Arc;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! # rt.block_on(async {
//! let session = PlaybackSession::new(Arc::new(SilentEngine::default()));
//!
//! let tracks = vec![
//!     Arc::new(Track::new("a", "A", ResourceLocator::new("https://example.com/a.mp3"))),
//!     Arc::new(Track::new("b", "B", ResourceLocator::new("https://example.com/b.mp3"))),
//! ];
//!
//! session.set_queue_and_play(tracks, 1).await.unwrap();
//! assert_eq!(session.current_index(), Some(1));
//! assert!(session.is_playing());
//!
//! session.play_next().await;
//! assert_eq!(session.current_index(), Some(0));
//!
//! session.shutdown().await;
//! # });
//! # }
//! ```

pub mod engine;
mod error;
mod events;
mod queue;
mod session;
pub mod types;

// Public exports
pub use engine::{
    LoadedMedia, MediaControl, MediaEngine, MediaStatus, SilentEngine, SilentHandle, StatusStream,
};
pub use error::{EngineError, PlaybackError, Result};
pub use events::{Observer, SessionEvent, Subscription};
pub use queue::Queue;
pub use session::PlaybackSession;
pub use types::PlaybackSnapshot;
