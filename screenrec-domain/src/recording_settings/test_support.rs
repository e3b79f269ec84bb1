// screenrec-domain/src/recording_settings/test_support.rs
#![cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use screenrec_core::types::{DisplayMetrics, PlatformVersion, Rotation};

use super::accessors::SettingsAccess;
use super::device_iface::DeviceInfo;
use super::keys::StaticKeyResolver;
use super::memory_store::MemoryPreferenceStore;
use super::persistence_iface::{ChangeCallback, ListenerHandle, PreferenceStore, PrefValue};

/// Device with fixed metrics; rotation can be changed between reads.
pub(crate) struct FixedDevice {
    metrics: DisplayMetrics,
    real_metrics: Option<DisplayMetrics>,
    rotation: Mutex<Rotation>,
    platform: PlatformVersion,
}

impl FixedDevice {
    pub(crate) fn new(metrics: DisplayMetrics) -> Self {
        Self { metrics, real_metrics: None, rotation: Mutex::new(Rotation::Rotation0), platform: PlatformVersion(33) }
    }

    pub(crate) fn with_real_metrics(mut self, real: DisplayMetrics) -> Self {
        self.real_metrics = Some(real);
        self
    }

    pub(crate) fn with_rotation(self, rotation: Rotation) -> Self {
        *self.rotation.lock() = rotation;
        self
    }

    pub(crate) fn with_platform(mut self, platform: PlatformVersion) -> Self {
        self.platform = platform;
        self
    }

    pub(crate) fn set_rotation(&self, rotation: Rotation) {
        *self.rotation.lock() = rotation;
    }
}

impl DeviceInfo for FixedDevice {
    fn display_metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    fn real_display_metrics(&self) -> DisplayMetrics {
        self.real_metrics.unwrap_or(self.metrics)
    }

    fn rotation(&self) -> Rotation {
        *self.rotation.lock()
    }

    fn platform_version(&self) -> PlatformVersion {
        self.platform
    }
}

/// Memory store that counts listener registrations and removals.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemoryPreferenceStore,
    registered: AtomicUsize,
    unregistered: AtomicUsize,
}

impl CountingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn registered(&self) -> usize {
        self.registered.load(Ordering::SeqCst)
    }

    pub(crate) fn unregistered(&self) -> usize {
        self.unregistered.load(Ordering::SeqCst)
    }

    pub(crate) fn active_listeners(&self) -> usize {
        self.inner.listener_count()
    }
}

impl PreferenceStore for CountingStore {
    fn get_raw(&self, key: &str) -> Option<PrefValue> {
        self.inner.get_raw(key)
    }

    fn set_raw(&self, key: &str, value: PrefValue) {
        self.inner.set_raw(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key)
    }

    fn on_change(&self, callback: ChangeCallback) -> ListenerHandle {
        self.registered.fetch_add(1, Ordering::SeqCst);
        self.inner.on_change(callback)
    }

    fn off_change(&self, handle: ListenerHandle) {
        self.unregistered.fetch_add(1, Ordering::SeqCst);
        self.inner.off_change(handle)
    }
}

/// Settings access over a fresh memory store seeded with `entries`.
pub(crate) fn access_with(entries: Vec<(&str, PrefValue)>) -> SettingsAccess {
    SettingsAccess::new(
        Arc::new(MemoryPreferenceStore::with_entries(entries)),
        Arc::new(StaticKeyResolver::new()),
    )
}
