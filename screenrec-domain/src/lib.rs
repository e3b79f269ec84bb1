//! Domain layer for ScreenRec.
//!
//! Provides the recording preference facade: typed, defaulted access to a persistent
//! key-value store, settings derived from the store and the live device (capture
//! resolution, encoder choice, file names), and change streams for the library view.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use screenrec_domain::recording_settings::{MemoryPreferenceStore, PreferencesService};
//!
//! let service = PreferencesService::with_defaults(Arc::new(MemoryPreferenceStore::new()), device);
//! service.initialize_on_first_run();
//! let mut sort_order = service.subscribe_sort_order()?;
//! println!("{:?} at {}", sort_order.latest(), service.resolution());
//! ```

// Re-export core module
pub use screenrec_core as core;

pub mod recording_settings;

pub use recording_settings::{
    AudioEncoder, DeviceInfo, KeyResolver, MemoryPreferenceStore, PreferenceError, PreferenceStore,
    PreferencesService, PrefValue, SettingKey, StaticKeyResolver, Subscription, VideoEncoder,
};
