// screenrec-domain/src/recording_settings/mod.rs
//! Recording preferences: typed accessors over a key-value store, derived capture
//! settings, capability-gated encoder selection and change streams.

pub mod accessors;
pub mod derivation;
pub mod device_iface;
pub mod encoders;
pub mod errors;
pub mod filename;
pub mod hub;
pub mod keys;
pub mod library;
pub mod memory_store;
pub mod persistence_iface;
pub mod service;
pub mod types;

pub use accessors::{SettingValue, SettingsAccess, TypedSetting};
pub use device_iface::DeviceInfo;
pub use encoders::{AudioEncoder, GatedEncoder, VideoEncoder};
pub use errors::PreferenceError;
pub use hub::{ChangeHub, Subscription};
pub use keys::{KeyResolver, SettingKey, StaticKeyResolver};
pub use memory_store::MemoryPreferenceStore;
pub use persistence_iface::{ChangeCallback, ListenerHandle, PreferenceStore, PrefValue};
pub use service::PreferencesService;
pub use types::{
    NightMode, OrderBy, OrientationMode, Resolution, SaveLocation, SaveLocationKind, SortBy, SortOrderOptions,
};

#[cfg(test)]
mod test_support;


#[cfg(test)]
mod service_tests;
