//! Playback session - core orchestration
//!
//! Owns the queue, the playing flag, and the single live engine handle.
//! Transport operations mutate the queue and then run a *transition*:
//! unload the previous handle, load the track under the cursor, start it.
//!
//! All state sits behind one mutex that is never held across an `await`,
//! so user operations and engine status callbacks are applied one at a time.
//! Loading is the only slow step; while a transition is loading, further
//! transition requests are dropped rather than queued.

use crate::{
    engine::{LoadedMedia, MediaControl, MediaEngine, MediaStatus, StatusStream},
    error::Result,
    events::{Observer, Observers, SessionEvent, Subscription},
    queue::Queue,
    types::PlaybackSnapshot,
};
use encore_core::Track;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, error, info, warn};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The handle currently loaded in the engine
struct LiveHandle<H> {
    handle: Arc<H>,
    generation: u64,
}

struct SessionState<H> {
    queue: Queue,
    is_playing: bool,
    live: Option<LiveHandle<H>>,
    /// Set while a transition is in flight
    loading: bool,
    /// Bumped on every transition; status from older generations is stale
    generation: u64,
    shut_down: bool,
}

impl<H> SessionState<H> {
    fn new() -> Self {
        Self {
            queue: Queue::new(),
            is_playing: false,
            live: None,
            loading: false,
            generation: 0,
            shut_down: false,
        }
    }

    fn set_playing(&mut self, is_playing: bool, events: &mut Vec<SessionEvent>) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            events.push(SessionEvent::StateChanged { is_playing });
        }
    }

    fn current_track_id(&self) -> Option<encore_core::TrackId> {
        self.queue.current().map(|track| track.id.clone())
    }

    /// Record a cursor move that happened since `previous` was read
    fn track_changed(
        &self,
        previous: Option<encore_core::TrackId>,
        events: &mut Vec<SessionEvent>,
    ) {
        events.push(SessionEvent::TrackChanged {
            track_id: self.current_track_id(),
            previous_track_id: previous,
        });
    }
}

fn lock<H>(state: &Mutex<SessionState<H>>) -> MutexGuard<'_, SessionState<H>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the loading flag when a transition ends, however it ends
struct TransitionGuard<'a, H> {
    state: &'a Mutex<SessionState<H>>,
}

impl<H> Drop for TransitionGuard<'_, H> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

/// Playback session manager
///
/// Construct one per application with [`PlaybackSession::new`] and hand the
/// returned `Arc` to whatever needs transport control. Call
/// [`shutdown`](Self::shutdown) on application exit to release the engine
/// handle.
///
/// Invariant: at most one engine handle is live at any time.
pub struct PlaybackSession<E: MediaEngine> {
    engine: Arc<E>,
    state: Mutex<SessionState<E::Handle>>,
    observers: Observers,
    me: Weak<Self>,
}

impl<E: MediaEngine> PlaybackSession<E> {
    /// Create a session driving `engine`
    pub fn new(engine: Arc<E>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            engine,
            state: Mutex::new(SessionState::new()),
            observers: Observers::default(),
            me: me.clone(),
        })
    }

    /// The engine this session drives
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    // ===== Reading state =====

    /// Current queue, cursor, and playing flag
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.lock();
        PlaybackSnapshot {
            current_track: state.queue.current().cloned(),
            current_index: state.queue.current_index(),
            is_playing: state.is_playing,
            queue_length: state.queue.len(),
            is_loaded: state.live.is_some(),
        }
    }

    /// Track under the queue cursor
    pub fn current_track(&self) -> Option<Arc<Track>> {
        self.lock().queue.current().cloned()
    }

    /// Queue cursor
    pub fn current_index(&self) -> Option<usize> {
        self.lock().queue.current_index()
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.lock().is_playing
    }

    /// Copy of the queued tracks
    pub fn queue(&self) -> Vec<Arc<Track>> {
        self.lock().queue.tracks().to_vec()
    }

    /// Whether an engine handle is live
    pub fn is_loaded(&self) -> bool {
        self.lock().live.is_some()
    }

    /// Register a callback for session events
    ///
    /// Keep the returned [`Subscription`]; dropping it unsubscribes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let observer: Observer = Arc::new(callback);
        self.observers.subscribe(observer)
    }

    // ===== Queue navigation =====

    /// Play `track`, adding it to the queue if needed
    ///
    /// If a track with the same ID is already queued, the first match becomes
    /// current. Otherwise the track is appended and becomes current.
    pub async fn play_track(&self, track: Arc<Track>) {
        self.update(|state, events| {
            let previous = state.current_track_id();
            let index = match state.queue.position_of(&track.id) {
                Some(index) => index,
                None => {
                    let index = state.queue.push(track);
                    events.push(SessionEvent::QueueChanged {
                        length: state.queue.len(),
                    });
                    index
                }
            };
            // Index came from the queue itself
            let selected = state.queue.select(index);
            debug_assert!(selected.is_ok());
            state.track_changed(previous, events);
        });

        self.transition().await;
    }

    /// Replace the queue and start playing at `start_index`
    ///
    /// # Errors
    /// `QueueEmpty` or `IndexOutOfBounds`; nothing changes on error.
    pub async fn set_queue_and_play(
        &self,
        tracks: Vec<Arc<Track>>,
        start_index: usize,
    ) -> Result<()> {
        self.update(|state, events| -> Result<()> {
            let previous = state.current_track_id();
            state.queue.replace(tracks, start_index)?;
            events.push(SessionEvent::QueueChanged {
                length: state.queue.len(),
            });
            state.track_changed(previous, events);
            Ok(())
        })?;

        self.transition().await;
        Ok(())
    }

    /// Advance with wrap-around; no-op on an empty queue
    pub async fn play_next(&self) {
        let moved = self.update(|state, events| {
            let previous = state.current_track_id();
            let moved = state.queue.advance().is_some();
            if moved {
                state.track_changed(previous, events);
            }
            moved
        });

        if moved {
            self.transition().await;
        }
    }

    /// Go back with wrap-around; no-op on an empty queue
    pub async fn play_prev(&self) {
        let moved = self.update(|state, events| {
            let previous = state.current_track_id();
            let moved = state.queue.retreat().is_some();
            if moved {
                state.track_changed(previous, events);
            }
            moved
        });

        if moved {
            self.transition().await;
        }
    }

    /// Empty the queue and release the live handle
    pub async fn clear_queue(&self) {
        self.update(|state, events| {
            let previous = state.current_track_id();
            state.queue.clear();
            events.push(SessionEvent::QueueChanged { length: 0 });
            state.track_changed(previous, events);
        });

        self.transition().await;
    }

    // ===== Playback control =====

    /// Pause playback; no-op unless a handle is live and playing
    pub async fn pause(&self) {
        let Some((handle, generation)) = self.live_handle_where(|playing| playing) else {
            return;
        };

        match self.engine.control(&handle, MediaControl::Pause).await {
            Ok(()) => self.update(|state, events| {
                if state.generation == generation {
                    state.set_playing(false, events);
                }
            }),
            Err(e) => warn!(error = %e, "Engine rejected pause"),
        }
    }

    /// Resume playback; no-op unless a handle is live and paused
    pub async fn resume(&self) {
        let Some((handle, generation)) = self.live_handle_where(|playing| !playing) else {
            return;
        };

        match self.engine.control(&handle, MediaControl::Play).await {
            Ok(()) => self.update(|state, events| {
                if state.generation == generation {
                    state.set_playing(true, events);
                }
            }),
            Err(e) => warn!(error = %e, "Engine rejected resume"),
        }
    }

    /// Pause if playing, resume otherwise
    pub async fn toggle_play_pause(&self) {
        if self.is_playing() {
            self.pause().await;
        } else {
            self.resume().await;
        }
    }

    /// Release the live handle and stop accepting transitions
    ///
    /// Call once on application teardown.
    pub async fn shutdown(&self) {
        let live = self.update(|state, events| {
            state.shut_down = true;
            state.generation += 1;
            state.set_playing(false, events);
            state.live.take()
        });

        if let Some(live) = live {
            if let Err(e) = self.engine.control(&live.handle, MediaControl::Unload).await {
                warn!(error = %e, "Failed to unload handle on shutdown");
            }
        }
        info!("Playback session shut down");
    }

    // ===== Transition protocol =====

    /// Swap the live handle for one playing the track under the cursor
    async fn transition(&self) {
        let (previous, target, generation) = {
            let mut state = self.lock();
            if state.shut_down {
                debug!("Session shut down, ignoring transition");
                return;
            }
            if state.loading {
                debug!("Transition already in flight, dropping request");
                return;
            }
            state.loading = true;
            state.generation += 1;
            (
                state.live.take(),
                state.queue.current().cloned(),
                state.generation,
            )
        };
        let guard = TransitionGuard { state: &self.state };

        if let Some(previous) = previous {
            // Best effort: the handle is gone from our side either way
            if let Err(e) = self
                .engine
                .control(&previous.handle, MediaControl::Unload)
                .await
            {
                warn!(error = %e, "Failed to unload previous handle");
            }
        }

        let Some(track) = target else {
            self.update(|state, events| state.set_playing(false, events));
            return;
        };

        let LoadedMedia { handle, status } = match self.engine.load(&track.audio).await {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(track = %track.id, error = %e, "Failed to load track");
                self.update(|state, events| {
                    state.set_playing(false, events);
                    events.push(SessionEvent::LoadFailed {
                        track_id: track.id.clone(),
                        message: e.to_string(),
                    });
                });
                return;
            }
        };
        let handle = Arc::new(handle);

        let stored = self.update(|state, _| {
            let current = !state.shut_down && state.generation == generation;
            if current {
                state.live = Some(LiveHandle {
                    handle: handle.clone(),
                    generation,
                });
            }
            current
        });
        if !stored {
            if let Err(e) = self.engine.control(&handle, MediaControl::Unload).await {
                warn!(error = %e, "Failed to unload handle loaded during shutdown");
            }
            return;
        }

        let started = match self.engine.control(&handle, MediaControl::Play).await {
            Ok(()) => true,
            Err(e) => {
                warn!(track = %track.id, error = %e, "Engine rejected play after load");
                false
            }
        };

        // Shutdown may have released the handle while play was pending
        let current = self.update(|state, events| {
            let current = state.generation == generation;
            if current {
                state.set_playing(started, events);
            }
            current
        });
        if !current {
            debug!(track = %track.id, "Session moved on while starting playback");
            return;
        }
        info!(track = %track.id, title = %track.title, "Now playing");

        // Status sent during play stays buffered until the guard is released
        drop(guard);
        self.spawn_status_pump(generation, status);
    }

    // ===== Engine status =====

    fn spawn_status_pump(&self, generation: u64, mut status: StatusStream) {
        let session = self.me.clone();
        tokio::spawn(async move {
            while let Some(event) = status.recv().await {
                let Some(live_session) = session.upgrade() else {
                    break;
                };
                live_session.on_media_status(generation, event).await;
            }
        });
    }

    /// React to a status update from the handle of `generation`
    fn on_media_status(&self, generation: u64, status: MediaStatus) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let current = self.lock().generation;
            if current != generation {
                debug!(?status, generation, current, "Ignoring status from stale handle");
                return;
            }

            match status {
                MediaStatus::Finished => {
                    debug!("Track finished, advancing");
                    self.play_next().await;
                }
                MediaStatus::Error(message) => {
                    // No auto-advance: a bad queue must not skip through silently
                    error!(%message, "Engine reported playback error");
                    self.update(|_, events| {
                        events.push(SessionEvent::EngineError { message });
                    });
                }
                MediaStatus::Playing => {
                    self.update(|state, events| state.set_playing(true, events));
                }
                MediaStatus::Paused => {
                    self.update(|state, events| state.set_playing(false, events));
                }
            }
        })
    }

    // ===== Helpers =====

    fn lock(&self) -> MutexGuard<'_, SessionState<E::Handle>> {
        lock(&self.state)
    }

    /// Live handle and its generation, if one exists and `is_playing` matches
    fn live_handle_where(&self, playing: impl Fn(bool) -> bool) -> Option<(Arc<E::Handle>, u64)> {
        let state = self.lock();
        let live = state.live.as_ref()?;
        playing(state.is_playing).then(|| (live.handle.clone(), live.generation))
    }

    /// Mutate state under the lock, then notify subscribers outside it
    fn update<R>(
        &self,
        f: impl FnOnce(&mut SessionState<E::Handle>, &mut Vec<SessionEvent>) -> R,
    ) -> R {
        let mut events = Vec::new();
        let result = {
            let mut state = self.lock();
            f(&mut state, &mut events)
        };
        self.observers.notify(&events);
        result
    }
}
