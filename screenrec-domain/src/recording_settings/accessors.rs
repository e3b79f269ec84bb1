//! Typed, defaulted views over raw store entries.
//!
//! A [`TypedSetting`] pairs a [`SettingKey`] with a value type, a default and an optional
//! validator. Reading one never fails: an absent entry, a value of the wrong shape, text
//! that does not parse, or a value rejected by the validator all yield the default, with
//! a debug log line recording the fallback.
//!
//! Numeric settings are persisted as text. Reads also accept a raw integer entry.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use screenrec_domain::recording_settings::accessors::{self, SettingsAccess};
//! use screenrec_domain::recording_settings::{MemoryPreferenceStore, PrefValue, PreferenceStore, StaticKeyResolver};
//!
//! let store = Arc::new(MemoryPreferenceStore::new());
//! let access = SettingsAccess::new(store.clone(), Arc::new(StaticKeyResolver::new()));
//!
//! assert_eq!(accessors::VIDEO_BITRATE.read(&access), 8_388_608);
//! store.set_raw("bitrate", PrefValue::from("garbage"));
//! assert_eq!(accessors::VIDEO_BITRATE.read(&access), 8_388_608);
//!
//! accessors::FPS.write(&access, 60);
//! assert_eq!(store.get_raw("fps"), Some(PrefValue::from("60")));
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::keys::{KeyResolver, SettingKey};
use super::persistence_iface::{PreferenceStore, PrefValue};
use super::types::{NightMode, OrderBy, OrientationMode, SortBy};

/// Store plus key resolver, shared by the service and its change hubs.
#[derive(Clone)]
pub struct SettingsAccess {
    store: Arc<dyn PreferenceStore>,
    keys: Arc<dyn KeyResolver>,
}

impl SettingsAccess {
    pub fn new(store: Arc<dyn PreferenceStore>, keys: Arc<dyn KeyResolver>) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &Arc<dyn PreferenceStore> {
        &self.store
    }

    pub fn store_key(&self, key: SettingKey) -> String {
        self.keys.resolve(key)
    }

    pub fn get_raw(&self, key: SettingKey) -> Option<PrefValue> {
        self.store.get_raw(&self.store_key(key))
    }

    pub fn set_raw(&self, key: SettingKey, value: PrefValue) {
        self.store.set_raw(&self.store_key(key), value)
    }

    pub fn remove(&self, key: SettingKey) {
        self.store.remove(&self.store_key(key))
    }

    /// The stored string, or `None` when absent or not a string entry.
    pub fn get_string(&self, key: SettingKey) -> Option<String> {
        match self.get_raw(key) {
            Some(PrefValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for SettingsAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsAccess").finish_non_exhaustive()
    }
}

/// Conversion between a typed value and its raw store form.
pub trait SettingValue: Sized {
    /// `None` when the raw value has the wrong shape or does not parse.
    fn from_raw(raw: &PrefValue) -> Option<Self>;

    fn into_raw(self) -> PrefValue;
}

impl SettingValue for bool {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        match raw {
            PrefValue::Bool(b) => Some(*b),
            PrefValue::Str(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            PrefValue::Int(_) => None,
        }
    }

    fn into_raw(self) -> PrefValue {
        PrefValue::Bool(self)
    }
}

impl SettingValue for String {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        raw.as_str().map(str::to_string)
    }

    fn into_raw(self) -> PrefValue {
        PrefValue::Str(self)
    }
}

impl SettingValue for u32 {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        match raw {
            PrefValue::Str(s) => s.trim().parse().ok(),
            PrefValue::Int(i) => u32::try_from(*i).ok(),
            PrefValue::Bool(_) => None,
        }
    }

    /// Numbers are persisted as text.
    fn into_raw(self) -> PrefValue {
        PrefValue::Str(self.to_string())
    }
}

impl SettingValue for NightMode {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        raw.as_str().and_then(NightMode::parse)
    }

    fn into_raw(self) -> PrefValue {
        PrefValue::from(self.as_str())
    }
}

impl SettingValue for OrientationMode {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        raw.as_str().and_then(OrientationMode::parse)
    }

    fn into_raw(self) -> PrefValue {
        PrefValue::from(self.as_str())
    }
}

impl SettingValue for SortBy {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        raw.as_str().and_then(SortBy::parse)
    }

    fn into_raw(self) -> PrefValue {
        PrefValue::from(self.as_str())
    }
}

impl SettingValue for OrderBy {
    fn from_raw(raw: &PrefValue) -> Option<Self> {
        raw.as_str().and_then(OrderBy::parse)
    }

    fn into_raw(self) -> PrefValue {
        PrefValue::from(self.as_str())
    }
}

/// A named, defaulted, type-coerced view over one store entry.
pub struct TypedSetting<T> {
    pub key: SettingKey,
    default: fn() -> T,
    validator: Option<fn(&T) -> bool>,
}

impl<T> TypedSetting<T> {
    pub const fn new(key: SettingKey, default: fn() -> T) -> Self {
        Self { key, default, validator: None }
    }

    pub const fn validated(key: SettingKey, default: fn() -> T, validator: fn(&T) -> bool) -> Self {
        Self { key, default, validator: Some(validator) }
    }

    pub fn default_value(&self) -> T {
        (self.default)()
    }
}

impl<T: SettingValue + fmt::Debug> TypedSetting<T> {
    /// The stored value if present, well-formed and valid.
    pub fn read_stored(&self, access: &SettingsAccess) -> Option<T> {
        let raw = access.get_raw(self.key)?;
        match T::from_raw(&raw) {
            Some(value) if self.validator.map_or(true, |is_valid| is_valid(&value)) => Some(value),
            Some(value) => {
                debug!("Stored value {:?} for {} failed validation, using default", value, self.key);
                None
            }
            None => {
                debug!("Stored value {} for {} could not be parsed, using default", raw, self.key);
                None
            }
        }
    }

    /// The stored value, or the default. Never fails.
    pub fn read(&self, access: &SettingsAccess) -> T {
        self.read_stored(access).unwrap_or_else(|| self.default_value())
    }

    pub fn write(&self, access: &SettingsAccess, value: T) {
        access.set_raw(self.key, value.into_raw());
    }

    pub fn clear(&self, access: &SettingsAccess) {
        access.remove(self.key);
    }
}

fn is_positive(value: &u32) -> bool {
    *value > 0
}

fn is_non_blank(value: &String) -> bool {
    !value.trim().is_empty()
}

pub const DEFAULT_VIDEO_BITRATE: u32 = 8_388_608;
pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_AUDIO_BITRATE: u32 = 1_280_000;
pub const DEFAULT_AUDIO_SAMPLING_RATE: u32 = 44_100;
pub const DEFAULT_FILENAME_FORMAT: &str = "yyyyMMdd_hhmmss";
pub const DEFAULT_FILENAME_PREFIX: &str = "REC";

pub const VIDEO_BITRATE: TypedSetting<u32> =
    TypedSetting::validated(SettingKey::VideoBitrate, || DEFAULT_VIDEO_BITRATE, is_positive);
pub const FPS: TypedSetting<u32> = TypedSetting::validated(SettingKey::Fps, || DEFAULT_FPS, is_positive);
pub const AUDIO_BITRATE: TypedSetting<u32> =
    TypedSetting::validated(SettingKey::AudioBitrate, || DEFAULT_AUDIO_BITRATE, is_positive);
pub const AUDIO_SAMPLING_RATE: TypedSetting<u32> =
    TypedSetting::validated(SettingKey::AudioSamplingRate, || DEFAULT_AUDIO_SAMPLING_RATE, is_positive);

/// Stored capture width. There is no fixed default; `0` stands for "unset" and the
/// derivation engine substitutes the device width.
pub const RESOLUTION_WIDTH: TypedSetting<u32> = TypedSetting::validated(SettingKey::ResolutionWidth, || 0, is_positive);

pub const FILENAME_FORMAT: TypedSetting<String> =
    TypedSetting::validated(SettingKey::FilenameFormat, || DEFAULT_FILENAME_FORMAT.to_string(), is_non_blank);
pub const FILENAME_PREFIX: TypedSetting<String> =
    TypedSetting::new(SettingKey::FilenamePrefix, || DEFAULT_FILENAME_PREFIX.to_string());

pub const NIGHT_MODE: TypedSetting<NightMode> = TypedSetting::new(SettingKey::NightMode, NightMode::default);
pub const ORIENTATION: TypedSetting<OrientationMode> =
    TypedSetting::new(SettingKey::Orientation, OrientationMode::default);

pub const RECORD_AUDIO: TypedSetting<bool> = TypedSetting::new(SettingKey::RecordAudio, || false);
pub const SHOW_TOUCHES: TypedSetting<bool> = TypedSetting::new(SettingKey::ShowTouches, || false);
pub const FLOATING_CONTROLS: TypedSetting<bool> = TypedSetting::new(SettingKey::FloatingControls, || false);
pub const FIRST_RUN: TypedSetting<bool> = TypedSetting::new(SettingKey::FirstRun, || true);

pub const SORT_BY: TypedSetting<SortBy> = TypedSetting::new(SettingKey::SortBy, SortBy::default);
pub const ORDER_BY: TypedSetting<OrderBy> = TypedSetting::new(SettingKey::OrderBy, OrderBy::default);
