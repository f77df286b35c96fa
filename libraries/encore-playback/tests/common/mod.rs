//! Shared test helpers: a scriptable media engine and event capture

#![allow(dead_code)]

use async_trait::async_trait;
use encore_core::{ResourceLocator, Track};
use encore_playback::{
    EngineError, LoadedMedia, MediaControl, MediaEngine, MediaStatus, PlaybackSession,
    SessionEvent, Subscription,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Notify};

// ===== Fake engine =====

/// Handle issued by [`FakeEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeHandle {
    pub id: u64,
    pub resource: String,
}

#[derive(Default)]
struct FakeState {
    next_id: u64,
    live: HashSet<u64>,
    max_live: usize,
    loads: Vec<String>,
    load_attempts: usize,
    commands: Vec<(u64, MediaControl)>,
    senders: HashMap<u64, mpsc::UnboundedSender<MediaStatus>>,
    failing: HashSet<String>,
    reject_play: bool,
    gate: Option<Arc<Notify>>,
    play_gate: Option<Arc<Notify>>,
    finish_on_play: bool,
}

/// Engine that records every call and lets tests drive status streams
///
/// Never emits status on its own; use [`FakeEngine::emit`].
#[derive(Default)]
pub struct FakeEngine {
    state: Mutex<FakeState>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every load of `resource` fail
    pub fn fail_resource(&self, resource: &str) {
        self.state.lock().unwrap().failing.insert(resource.to_string());
    }

    /// Reject `Play` on every handle
    pub fn reject_play(&self) {
        self.state.lock().unwrap().reject_play = true;
    }

    /// Hold every subsequent load until the returned gate is notified
    pub fn gate_loads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().gate = Some(gate.clone());
        gate
    }

    /// Let loads through immediately again
    pub fn open_gate(&self) {
        self.state.lock().unwrap().gate = None;
    }

    /// Hold the next `Play` until the returned gate is notified
    pub fn gate_next_play(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().play_gate = Some(gate.clone());
        gate
    }

    /// Report `Finished` from inside the next `Play`, as a very short clip would
    pub fn finish_on_next_play(&self) {
        self.state.lock().unwrap().finish_on_play = true;
    }

    /// Resources successfully loaded, in order
    pub fn loads(&self) -> Vec<String> {
        self.state.lock().unwrap().loads.clone()
    }

    /// Number of `load` calls, including pending and failed ones
    pub fn load_attempts(&self) -> usize {
        self.state.lock().unwrap().load_attempts
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().unwrap().live.len()
    }

    /// Highest number of simultaneously live handles ever observed
    pub fn max_live(&self) -> usize {
        self.state.lock().unwrap().max_live
    }

    pub fn commands(&self) -> Vec<(u64, MediaControl)> {
        self.state.lock().unwrap().commands.clone()
    }

    /// Commands other than `Unload`, without handle IDs
    pub fn transport_commands(&self) -> Vec<MediaControl> {
        self.commands()
            .into_iter()
            .map(|(_, command)| command)
            .filter(|command| *command != MediaControl::Unload)
            .collect()
    }

    /// ID of the most recently issued handle
    pub fn last_handle(&self) -> Option<u64> {
        let state = self.state.lock().unwrap();
        state.next_id.checked_sub(1)
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.state.lock().unwrap().live.contains(&id)
    }

    /// Push a status update onto a handle's stream, live or not
    pub fn emit(&self, id: u64, status: MediaStatus) {
        let state = self.state.lock().unwrap();
        if let Some(sender) = state.senders.get(&id) {
            let _ = sender.send(status);
        }
    }
}

#[async_trait]
impl MediaEngine for FakeEngine {
    type Handle = FakeHandle;

    async fn load(
        &self,
        resource: &ResourceLocator,
    ) -> Result<LoadedMedia<FakeHandle>, EngineError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.load_attempts += 1;
            state.gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        if state.failing.contains(resource.as_str()) {
            return Err(EngineError::load(resource, "unsupported format"));
        }

        let id = state.next_id;
        state.next_id += 1;
        state.live.insert(id);
        state.max_live = state.max_live.max(state.live.len());
        state.loads.push(resource.to_string());

        let (sender, status) = mpsc::unbounded_channel();
        state.senders.insert(id, sender);

        Ok(LoadedMedia {
            handle: FakeHandle {
                id,
                resource: resource.to_string(),
            },
            status,
        })
    }

    async fn control(&self, handle: &FakeHandle, command: MediaControl) -> Result<(), EngineError> {
        let gate = match command {
            MediaControl::Play => self.state.lock().unwrap().play_gate.take(),
            _ => None,
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let finished = {
            let mut state = self.state.lock().unwrap();
            if !state.live.contains(&handle.id) {
                return Err(EngineError::UnknownHandle);
            }
            state.commands.push((handle.id, command));

            match command {
                MediaControl::Unload => {
                    state.live.remove(&handle.id);
                    return Ok(());
                }
                MediaControl::Play if state.reject_play => {
                    return Err(EngineError::control(command, "autoplay blocked"));
                }
                MediaControl::Play if state.finish_on_play => {
                    state.finish_on_play = false;
                    if let Some(sender) = state.senders.get(&handle.id) {
                        let _ = sender.send(MediaStatus::Finished);
                    }
                    true
                }
                _ => false,
            }
        };

        // Give the session's tasks a chance to see the status before play returns
        if finished {
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
        }
        Ok(())
    }
}

// ===== Tracks =====

/// Track whose resource string is `<id>.mp3`
pub fn track(id: &str) -> Arc<Track> {
    Arc::new(Track::new(
        id,
        format!("Track {}", id.to_uppercase()),
        ResourceLocator::new(format!("{id}.mp3")),
    ))
}

pub fn tracks(ids: &[&str]) -> Vec<Arc<Track>> {
    ids.iter().map(|id| track(id)).collect()
}

// ===== Events =====

/// Collects session events through a subscription
pub struct EventLog {
    _subscription: Subscription,
    receiver: mpsc::UnboundedReceiver<SessionEvent>,
}

impl EventLog {
    pub fn attach<E: MediaEngine>(session: &PlaybackSession<E>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let subscription = session.subscribe(move |event| {
            let _ = sender.send(event.clone());
        });
        Self {
            _subscription: subscription,
            receiver,
        }
    }

    /// Everything received so far
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait for the first event matching `predicate`, discarding the rest
    pub async fn wait_for(&mut self, predicate: impl Fn(&SessionEvent) -> bool) -> SessionEvent {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let event = self.receiver.recv().await.expect("event stream closed");
                if predicate(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("timed out waiting for session event")
    }
}

/// Poll `condition` until it holds
pub async fn eventually(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition never became true");
}
