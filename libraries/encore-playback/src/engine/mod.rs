//! Media engine contract
//!
//! The session manager drives audio through this boundary: load a resource
//! into a handle, control the handle, and listen to the handle's status
//! stream. Decoding and output live entirely on the engine side.

mod silent;

pub use silent::{SilentEngine, SilentHandle};

use crate::error::EngineError;
use async_trait::async_trait;
use encore_core::ResourceLocator;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Status updates for one handle, in the order the engine detects them
///
/// Repeated identical states are allowed; consumers treat them as idempotent.
pub type StatusStream = mpsc::UnboundedReceiver<MediaStatus>;

/// Commands accepted by a loaded handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaControl {
    /// Start or resume audible playback (no-op if already playing)
    Play,
    /// Pause playback (no-op if already paused)
    Pause,
    /// Release every engine resource held by the handle
    ///
    /// The handle is invalid afterwards.
    Unload,
}

impl fmt::Display for MediaControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaControl::Play => write!(f, "play"),
            MediaControl::Pause => write!(f, "pause"),
            MediaControl::Unload => write!(f, "unload"),
        }
    }
}

/// Status reported by the engine for a handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaStatus {
    /// Audible playback is running
    Playing,
    /// Playback is paused (possibly by the OS)
    Paused,
    /// End of media reached
    Finished,
    /// Engine-side failure while playing
    Error(String),
}

/// A freshly loaded resource: its handle plus the handle's status stream
#[derive(Debug)]
pub struct LoadedMedia<H> {
    /// Opaque engine handle
    pub handle: H,
    /// Status updates for `handle`
    pub status: StatusStream,
}

/// Platform media engine
///
/// Implementors wrap the platform's decode/output capability. `load` must
/// leave the resource prepared but silent; audible playback starts only on
/// [`MediaControl::Play`].
#[async_trait]
pub trait MediaEngine: Send + Sync + 'static {
    /// Engine-side handle for one loaded resource
    type Handle: Send + Sync + 'static;

    /// Open and prepare a resource
    ///
    /// # Errors
    /// [`EngineError::Load`] if the resource cannot be opened or decoded
    async fn load(
        &self,
        resource: &ResourceLocator,
    ) -> Result<LoadedMedia<Self::Handle>, EngineError>;

    /// Play, pause, or unload a handle
    async fn control(
        &self,
        handle: &Self::Handle,
        command: MediaControl,
    ) -> Result<(), EngineError>;
}
