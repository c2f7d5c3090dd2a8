//! Change subscription: polls the API for watched sets and collections and
//! notifies listeners of what changed.
//!
//! Flickr does not roll up change times. An updated photo does not mark its
//! set updated, nor does an updated set mark its collection. Change is
//! therefore detected at every level:
//!
//! | Entity | Changed when |
//! |--------|--------------|
//! | Collection | a set is added or removed |
//! | Set | its update time advances, a photo is added or removed, or a photo's update time advances |
//!
//! The subscription becomes active on the first [`add`](ChangeSubscription::add)
//! and polls until [`stop`](ChangeSubscription::stop) is called or the
//! subscription is dropped.

mod poller;

use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::{Collection, SetPhotos};
use crate::traits::WatchSource;
use crate::watch::{map_leaf_timestamps, Changes, WatchStore, WatchedSet};

/// Shortest accepted poll interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Poll interval used when none or an invalid one is given.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

const EVENT_CAPACITY: usize = 64;

/// Notifications published on [`ChangeSubscription::events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEvent {
    /// Sets or collections changed.
    Change(Changes),
    /// A poll cycle completed without finding any change.
    NoChange,
    /// A listener was added.
    NewWatcher,
}

/// Change listener.
pub type ChangeCallback = Arc<dyn Fn(&Changes) + Send + Sync>;

#[derive(Default)]
struct State {
    store: WatchStore,
    changes: Changes,
    active: bool,
    poll_interval: Duration,
    task: Option<JoinHandle<()>>,
}

/// Poll-based change detection over the watched registry.
pub struct ChangeSubscription {
    source: Weak<dyn WatchSource>,
    isolate_failures: bool,
    state: Mutex<State>,
    listeners: RwLock<Vec<ChangeCallback>>,
    events: broadcast::Sender<SubscriptionEvent>,
}

impl std::fmt::Debug for ChangeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ChangeSubscription")
            .field("active", &state.active)
            .field("poll_interval", &state.poll_interval)
            .field("watched", &state.store.len())
            .field("changes", &state.changes)
            .finish()
    }
}

impl ChangeSubscription {
    /// Create an inactive subscription that re-fetches through `source`.
    ///
    /// With `isolate_failures` a failed re-fetch is logged and the cycle
    /// carries on; otherwise the first failure aborts the cycle and polling
    /// stops until another listener is added.
    pub fn new(source: Weak<dyn WatchSource>, isolate_failures: bool) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            source,
            isolate_failures,
            state: Mutex::new(State {
                poll_interval: DEFAULT_POLL_INTERVAL,
                ..State::default()
            }),
            listeners: RwLock::new(Vec::new()),
            events,
        })
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Receive subscription events.
    pub fn events(&self) -> broadcast::Receiver<SubscriptionEvent> {
        self.events.subscribe()
    }

    /// Whether any listener has been added and polling was not stopped.
    pub fn active(&self) -> bool {
        self.state().active
    }

    pub fn poll_interval(&self) -> Duration {
        self.state().poll_interval
    }

    /// Changes accumulated but not yet emitted.
    pub fn changes(&self) -> Changes {
        self.state().changes.clone()
    }

    /// Copy of the watched registry.
    pub fn watched(&self) -> WatchStore {
        self.state().store.clone()
    }

    pub fn watched_set(&self, id: &str) -> Option<WatchedSet> {
        self.state().store.get(id).cloned()
    }

    /// Register a change listener without activating the subscription or
    /// starting the poll.
    pub fn listen<F>(&self, callback: F)
    where
        F: Fn(&Changes) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(callback));
    }

    /// Add a listener and start polling every `poll_interval`.
    ///
    /// Intervals below [`MIN_POLL_INTERVAL`] are replaced with
    /// [`DEFAULT_POLL_INTERVAL`]. Must be called within a Tokio runtime.
    pub fn add<F>(self: &Arc<Self>, callback: F, poll_interval: Duration)
    where
        F: Fn(&Changes) + Send + Sync + 'static,
    {
        let poll_interval = if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                "Poll interval of {:?} is invalid; reverting to {:?}",
                poll_interval, DEFAULT_POLL_INTERVAL
            );
            DEFAULT_POLL_INTERVAL
        } else {
            poll_interval
        };

        self.listen(callback);

        {
            let mut state = self.state();
            state.poll_interval = poll_interval;
            state.active = true;
        }

        let _ = self.events.send(SubscriptionEvent::NewWatcher);

        let mut state = self.state();
        let running = state.task.as_ref().is_some_and(|t| !t.is_finished());
        if !running {
            state.task = Some(poller::spawn(Arc::downgrade(self)));
        }
    }

    /// Cancel the scheduled poll and mark the subscription inactive.
    /// Listeners are kept; adding another one resumes polling.
    pub fn stop(&self) {
        let mut state = self.state();
        if let Some(task) = state.task.take() {
            task.abort();
        }
        state.active = false;
    }

    /// Record the full collection tree.
    pub fn update_collections(&self, collections: &[Collection]) {
        let mut state = self.state();
        let delta = state.store.update_collections(collections);
        state.changes.merge(delta);
    }

    /// Record a set's own update time.
    pub fn record_set_timestamp(&self, id: &str, last_update: i64) {
        let mut state = self.state();
        let compare = state.active;
        let delta = state.store.record_timestamp(id, last_update, compare);
        state.changes.merge(delta);
    }

    /// Record a set's photo listing. Photos must carry `last_update`.
    pub fn record_set_photos(&self, id: &str, photos: &SetPhotos) {
        let snapshot = map_leaf_timestamps(&photos.photo);
        let mut state = self.state();
        let compare = state.active;
        let delta = state.store.record_photos(id, snapshot, compare);
        state.changes.merge(delta);
    }

    /// Notify listeners of accumulated changes and reset them, or publish
    /// [`SubscriptionEvent::NoChange`] when there are none.
    pub fn emit_change(&self) {
        let pending = {
            let mut state = self.state();
            if state.changes.is_empty() {
                None
            } else {
                Some(std::mem::take(&mut state.changes).deduped())
            }
        };

        let Some(changes) = pending else {
            let _ = self.events.send(SubscriptionEvent::NoChange);
            return;
        };

        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for listener in &listeners {
            listener(&changes);
        }

        info!(
            sets = ?changes.sets,
            collections = ?changes.collections,
            "Flickr sets [{}] or collections [{}] changed",
            changes.sets.join(","),
            changes.collections.join(",")
        );
        let _ = self.events.send(SubscriptionEvent::Change(changes));
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = state.task.take() {
            task.abort();
        }
    }
}
