// screenrec-domain/src/recording_settings/memory_store.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use super::persistence_iface::{ChangeCallback, ListenerHandle, PreferenceStore, PrefValue};

/// Thread-safe in-memory [`PreferenceStore`].
///
/// Listeners run synchronously on the writing thread after both internal locks are
/// released, and only when the stored value actually changed or an existing entry was
/// removed.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, PrefValue>>,
    listeners: Mutex<Vec<(u64, ChangeCallback)>>,
    next_listener_id: AtomicU64,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`. No listeners exist yet, so nothing fires.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, PrefValue)>,
        K: Into<String>,
    {
        let store = Self::new();
        store
            .values
            .write()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v)));
        store
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    fn notify(&self, key: &str) {
        let callbacks: Vec<ChangeCallback> = self.listeners.lock().iter().map(|(_, cb)| cb.clone()).collect();
        trace!("Notifying {} listener(s) of change to '{}'", callbacks.len(), key);
        for callback in callbacks {
            callback(key);
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_raw(&self, key: &str) -> Option<PrefValue> {
        self.values.read().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: PrefValue) {
        let changed = {
            let mut values = self.values.write();
            match values.get(key) {
                Some(existing) if *existing == value => false,
                _ => {
                    values.insert(key.to_string(), value);
                    true
                }
            }
        };
        if changed {
            self.notify(key);
        }
    }

    fn remove(&self, key: &str) {
        let removed = self.values.write().remove(key).is_some();
        if removed {
            self.notify(key);
        }
    }

    fn on_change(&self, callback: ChangeCallback) -> ListenerHandle {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, callback));
        debug!("Registered store listener {}", id);
        ListenerHandle::new(id)
    }

    fn off_change(&self, handle: ListenerHandle) {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != handle.id());
        if listeners.len() < before {
            debug!("Unregistered store listener {}", handle.id());
        }
    }
}
