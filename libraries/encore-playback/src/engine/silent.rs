//! Headless media engine
//!
//! Produces no sound. Each handle carries a clock of fixed length that runs
//! while the handle is playing and reports `Finished` when it runs out.
//! Useful for terminals without an audio device and for tests.

use super::{LoadedMedia, MediaControl, MediaEngine, MediaStatus};
use crate::error::EngineError;
use async_trait::async_trait;
use encore_core::ResourceLocator;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default simulated track length
const DEFAULT_TRACK_LENGTH: Duration = Duration::from_secs(180);

/// Handle issued by [`SilentEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SilentHandle {
    id: u64,
}

struct Clock {
    remaining: Duration,
    started: Option<Instant>,
    timer: Option<JoinHandle<()>>,
    status: mpsc::UnboundedSender<MediaStatus>,
}

impl Clock {
    fn new(length: Duration, status: mpsc::UnboundedSender<MediaStatus>) -> Self {
        Self {
            remaining: length,
            started: None,
            timer: None,
            status,
        }
    }

    fn start(&mut self) {
        if self.started.is_some() {
            return;
        }
        self.started = Some(Instant::now());

        let status = self.status.clone();
        let remaining = self.remaining;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(remaining).await;
            // Receiver gone means the session moved on
            let _ = status.send(MediaStatus::Finished);
        }));
        let _ = self.status.send(MediaStatus::Playing);
    }

    fn pause(&mut self) {
        let Some(started) = self.started.take() else {
            return;
        };
        self.remaining = self.remaining.saturating_sub(started.elapsed());
        self.stop_timer();
        let _ = self.status.send(MediaStatus::Paused);
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Media engine that keeps time instead of decoding audio
pub struct SilentEngine {
    track_length: Duration,
    next_id: AtomicU64,
    clocks: Mutex<HashMap<u64, Clock>>,
}

impl SilentEngine {
    /// Create an engine whose tracks all last `track_length`
    pub fn new(track_length: Duration) -> Self {
        Self {
            track_length,
            next_id: AtomicU64::new(1),
            clocks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of handles currently loaded
    pub fn loaded_handles(&self) -> usize {
        self.clocks().len()
    }

    fn clocks(&self) -> MutexGuard<'_, HashMap<u64, Clock>> {
        self.clocks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SilentEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_LENGTH)
    }
}

#[async_trait]
impl MediaEngine for SilentEngine {
    type Handle = SilentHandle;

    async fn load(
        &self,
        resource: &ResourceLocator,
    ) -> Result<LoadedMedia<SilentHandle>, EngineError> {
        if let Some(path) = resource.as_path() {
            let metadata = tokio::fs::metadata(path)
                .await
                .map_err(|e| EngineError::load(resource, e))?;
            if !metadata.is_file() {
                return Err(EngineError::load(resource, "not a regular file"));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.clocks().insert(id, Clock::new(self.track_length, tx));

        Ok(LoadedMedia {
            handle: SilentHandle { id },
            status: rx,
        })
    }

    async fn control(
        &self,
        handle: &SilentHandle,
        command: MediaControl,
    ) -> Result<(), EngineError> {
        let mut clocks = self.clocks();
        match command {
            MediaControl::Unload => {
                let mut clock = clocks
                    .remove(&handle.id)
                    .ok_or(EngineError::UnknownHandle)?;
                clock.stop_timer();
            }
            MediaControl::Play => clocks
                .get_mut(&handle.id)
                .ok_or(EngineError::UnknownHandle)?
                .start(),
            MediaControl::Pause => clocks
                .get_mut(&handle.id)
                .ok_or(EngineError::UnknownHandle)?
                .pause(),
        }
        Ok(())
    }
}
