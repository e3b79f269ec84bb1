//! Change notification hub.
//!
//! A [`ChangeHub`] turns the store's raw change callbacks into a stream of typed
//! snapshots shared by any number of [`Subscription`]s.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──first subscribe──▶ Active ──last cancel──▶ Idle
//!    │                          │
//!    └────────close / drop──────┴──────────────────▶ Closed (terminal)
//! ```
//!
//! - One store listener is registered while the hub is `Active` and unregistered exactly
//!   once when it leaves that state.
//! - A new subscriber immediately receives the current snapshot.
//! - On each store change the snapshot is recomputed and broadcast to all subscribers.
//!   An optional key filter restricts which store keys trigger recomputation.
//! - Each subscriber buffers only the latest snapshot (a `tokio::sync::watch` channel).
//! - A snapshot computation that fails is logged and skipped; the stream stays open.
//!
//! Subscriber bookkeeping and broadcasting run under one lock per hub, so `subscribe`
//! and `cancel` are safe to call while a change is being delivered. Snapshot
//! computations run under that lock and must only read from the store. `subscribe`
//! registers the store listener under that lock too; see [`PreferenceStore`] for what
//! this requires of store implementations.

use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::errors::PreferenceError;
use super::persistence_iface::{ListenerHandle, PreferenceStore};

/// Computes the current snapshot from the store.
pub type SnapshotFn<T> = Box<dyn Fn() -> Result<T, PreferenceError> + Send + Sync>;

/// Decides whether a change to the given store key is relevant.
pub type KeyFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Debug)]
enum Phase {
    Idle,
    Active(ListenerHandle),
    Closed,
}

struct HubState<T> {
    phase: Phase,
    subscribers: HashMap<u64, watch::Sender<T>>,
    next_subscriber_id: u64,
}

struct HubShared<T> {
    name: String,
    store: Arc<dyn PreferenceStore>,
    compute: SnapshotFn<T>,
    key_filter: Option<KeyFilter>,
    state: Mutex<HubState<T>>,
}

impl<T: Clone + Send + Sync + 'static> HubShared<T> {
    fn on_store_change(&self, key: &str) {
        if let Some(filter) = &self.key_filter {
            if !filter(key) {
                return;
            }
        }

        let state = self.state.lock();
        if !matches!(state.phase, Phase::Active(_)) || state.subscribers.is_empty() {
            return;
        }
        match (self.compute)() {
            Ok(snapshot) => {
                debug!("Stream '{}': broadcasting to {} subscriber(s) after change to '{}'", self.name, state.subscribers.len(), key);
                for sender in state.subscribers.values() {
                    sender.send_replace(snapshot.clone());
                }
            }
            Err(e) => warn!("Stream '{}': skipping emission after change to '{}': {}", self.name, key, e),
        }
    }

    fn unsubscribe(&self, id: u64) {
        let released = {
            let mut state = self.state.lock();
            if state.subscribers.remove(&id).is_none() || !state.subscribers.is_empty() {
                None
            } else {
                match mem::replace(&mut state.phase, Phase::Idle) {
                    Phase::Active(handle) => Some(handle),
                    other => {
                        state.phase = other;
                        None
                    }
                }
            }
        };
        if let Some(handle) = released {
            info!("Stream '{}': last subscriber left, releasing store listener", self.name);
            self.store.off_change(handle);
        }
    }

    fn close(&self) {
        let (released, subscribers) = {
            let mut state = self.state.lock();
            let previous = mem::replace(&mut state.phase, Phase::Closed);
            let subscribers = mem::take(&mut state.subscribers);
            let released = match previous {
                Phase::Active(handle) => Some(handle),
                _ => None,
            };
            (released, subscribers)
        };
        // Dropping the senders ends every subscriber's stream.
        drop(subscribers);
        if let Some(handle) = released {
            self.store.off_change(handle);
        }
        debug!("Stream '{}' closed", self.name);
    }
}

/// Multi-subscriber stream of snapshots derived from the store.
///
/// Dropping the hub closes it.
pub struct ChangeHub<T: Clone + Send + Sync + 'static> {
    shared: Arc<HubShared<T>>,
}

impl<T: Clone + Send + Sync + 'static> ChangeHub<T> {
    /// A hub that recomputes on every store change.
    pub fn new(name: impl Into<String>, store: Arc<dyn PreferenceStore>, compute: SnapshotFn<T>) -> Self {
        Self::build(name.into(), store, compute, None)
    }

    /// A hub that recomputes only for store keys accepted by `key_filter`.
    pub fn filtered(
        name: impl Into<String>,
        store: Arc<dyn PreferenceStore>,
        compute: SnapshotFn<T>,
        key_filter: KeyFilter,
    ) -> Self {
        Self::build(name.into(), store, compute, Some(key_filter))
    }

    fn build(name: String, store: Arc<dyn PreferenceStore>, compute: SnapshotFn<T>, key_filter: Option<KeyFilter>) -> Self {
        Self {
            shared: Arc::new(HubShared {
                name,
                store,
                compute,
                key_filter,
                state: Mutex::new(HubState { phase: Phase::Idle, subscribers: HashMap::new(), next_subscriber_id: 0 }),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Adds a subscriber. Its first value is the snapshot computed now.
    ///
    /// The store listener is registered before the initial snapshot is read, so a write
    /// landing in between is broadcast to the new subscriber once this call returns.
    ///
    /// # Errors
    ///
    /// - [`PreferenceError::HubClosed`] if the hub has been closed.
    /// - Any error from computing the initial snapshot. A listener registered by this
    ///   call is released again.
    pub fn subscribe(&self) -> Result<Subscription<T>, PreferenceError> {
        let shared = &self.shared;
        let mut state = shared.state.lock();
        if matches!(state.phase, Phase::Closed) {
            return Err(PreferenceError::HubClosed { stream: shared.name.clone() });
        }

        let registered = if matches!(state.phase, Phase::Idle) {
            let weak: Weak<HubShared<T>> = Arc::downgrade(shared);
            Some(shared.store.on_change(Arc::new(move |key: &str| {
                if let Some(hub) = weak.upgrade() {
                    hub.on_store_change(key);
                }
            })))
        } else {
            None
        };

        let initial = match (shared.compute)() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                drop(state);
                if let Some(handle) = registered {
                    shared.store.off_change(handle);
                }
                return Err(e);
            }
        };

        let (sender, receiver) = watch::channel(initial);
        let id = state.next_subscriber_id;
        state.next_subscriber_id += 1;
        state.subscribers.insert(id, sender);

        if let Some(handle) = registered {
            state.phase = Phase::Active(handle);
            info!("Stream '{}': first subscriber, store listener registered", shared.name);
        }

        Ok(Subscription {
            id,
            receiver,
            replay_pending: true,
            cancelled: false,
            hub: Arc::downgrade(shared),
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().subscribers.len()
    }

    /// `true` while a store listener is registered.
    pub fn is_active(&self) -> bool {
        matches!(self.shared.state.lock().phase, Phase::Active(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.shared.state.lock().phase, Phase::Closed)
    }

    /// Ends every subscription and releases the store listener. Idempotent.
    pub fn close(&self) {
        self.shared.close();
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for ChangeHub<T> {
    fn drop(&mut self) {
        self.shared.close();
    }
}

/// One subscriber's view of a [`ChangeHub`]. Dropping it cancels it.
pub struct Subscription<T: Clone + Send + Sync + 'static> {
    id: u64,
    receiver: watch::Receiver<T>,
    replay_pending: bool,
    cancelled: bool,
    hub: Weak<HubShared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Subscription<T> {
    /// The most recent snapshot delivered to this subscriber.
    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// The next undelivered snapshot, without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        if self.cancelled {
            return None;
        }
        if self.replay_pending {
            self.replay_pending = false;
            return Some(self.receiver.borrow_and_update().clone());
        }
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Waits for the next snapshot. The replayed snapshot comes first; `None` once the
    /// subscription is cancelled or the hub is closed.
    pub async fn next(&mut self) -> Option<T> {
        if self.cancelled {
            return None;
        }
        if self.replay_pending {
            self.replay_pending = false;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stops delivery to this subscriber. After return no further snapshot is observed.
    pub fn cancel(&mut self) {
        if mem::replace(&mut self.cancelled, true) {
            return;
        }
        self.replay_pending = false;
        if let Some(hub) = self.hub.upgrade() {
            hub.unsubscribe(self.id);
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

