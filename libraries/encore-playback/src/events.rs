//! Session events and subscriptions
//!
//! The session notifies subscribers after every state change. Callbacks run
//! synchronously on the task that changed the state, after the state lock
//! has been released, so they may read the session freely.

use encore_core::TrackId;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The queue cursor moved
    ///
    /// Emitted as soon as the index changes, before the new track has loaded.
    TrackChanged {
        /// Track now under the cursor (`None` once the queue is cleared)
        track_id: Option<TrackId>,
        /// Track previously under the cursor
        previous_track_id: Option<TrackId>,
    },

    /// The playing flag flipped
    StateChanged {
        /// New value of the playing flag
        is_playing: bool,
    },

    /// Queue contents replaced, extended, or cleared
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// The engine could not load the track under the cursor
    LoadFailed {
        /// Track that failed
        track_id: TrackId,
        /// Engine error message
        message: String,
    },

    /// The engine reported an error on the live handle
    EngineError {
        /// Engine error message
        message: String,
    },
}

/// Subscriber callback
pub type Observer = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct ObserverList {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

fn lock(list: &Mutex<ObserverList>) -> MutexGuard<'_, ObserverList> {
    list.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry of session subscribers
#[derive(Default)]
pub(crate) struct Observers {
    list: Arc<Mutex<ObserverList>>,
}

impl Observers {
    pub(crate) fn subscribe(&self, observer: Observer) -> Subscription {
        let mut list = lock(&self.list);
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, observer));

        Subscription {
            list: Arc::downgrade(&self.list),
            id,
        }
    }

    pub(crate) fn notify(&self, events: &[SessionEvent]) {
        if events.is_empty() {
            return;
        }

        // Snapshot so callbacks can subscribe/unsubscribe without deadlocking
        let observers: Vec<Observer> = lock(&self.list)
            .entries
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for event in events {
            for observer in &observers {
                observer(event);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        lock(&self.list).entries.len()
    }
}

/// Handle to an active subscription
///
/// Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    list: Weak<Mutex<ObserverList>>,
    id: u64,
}

impl Subscription {
    /// Stop receiving events
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(list) = self.list.upgrade() {
            lock(&list).entries.retain(|(id, _)| *id != self.id);
        }
    }
}
