//! Symbolic setting keys and their resolution to store key strings.
//!
//! Callers never hard-code store keys. Every entry is addressed through a [`SettingKey`],
//! and a [`KeyResolver`] maps it to the string the store actually uses. The mapping is
//! fixed for the lifetime of the process.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbolic identifier of one persisted preference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    VideoBitrate,
    Fps,
    AudioBitrate,
    AudioSamplingRate,
    ResolutionWidth,
    Orientation,
    VideoEncoder,
    AudioEncoder,
    FilenameFormat,
    FilenamePrefix,
    NightMode,
    RecordAudio,
    ShowTouches,
    FloatingControls,
    FirstRun,
    SaveLocationUri,
    SaveLocationKind,
    SortBy,
    OrderBy,
}

impl SettingKey {
    pub const ALL: [SettingKey; 19] = [
        SettingKey::VideoBitrate,
        SettingKey::Fps,
        SettingKey::AudioBitrate,
        SettingKey::AudioSamplingRate,
        SettingKey::ResolutionWidth,
        SettingKey::Orientation,
        SettingKey::VideoEncoder,
        SettingKey::AudioEncoder,
        SettingKey::FilenameFormat,
        SettingKey::FilenamePrefix,
        SettingKey::NightMode,
        SettingKey::RecordAudio,
        SettingKey::ShowTouches,
        SettingKey::FloatingControls,
        SettingKey::FirstRun,
        SettingKey::SaveLocationUri,
        SettingKey::SaveLocationKind,
        SettingKey::SortBy,
        SettingKey::OrderBy,
    ];

    /// Store key used when no override is configured.
    pub fn default_store_key(&self) -> &'static str {
        match self {
            SettingKey::VideoBitrate => "bitrate",
            SettingKey::Fps => "fps",
            SettingKey::AudioBitrate => "audiobitrate",
            SettingKey::AudioSamplingRate => "audiosamplingrate",
            SettingKey::ResolutionWidth => "resolution",
            SettingKey::Orientation => "orientation",
            SettingKey::VideoEncoder => "video_encoder",
            SettingKey::AudioEncoder => "audio_encoder",
            SettingKey::FilenameFormat => "filename",
            SettingKey::FilenamePrefix => "fileprefix",
            SettingKey::NightMode => "night_mode",
            SettingKey::RecordAudio => "audio",
            SettingKey::ShowTouches => "show_touches",
            SettingKey::FloatingControls => "floating_controls",
            SettingKey::FirstRun => "first_run",
            SettingKey::SaveLocationUri => "save_location_uri",
            SettingKey::SaveLocationKind => "save_location_kind",
            SettingKey::SortBy => "sort_by",
            SettingKey::OrderBy => "order_by",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Maps symbolic keys to store key strings.
pub trait KeyResolver: Send + Sync {
    fn resolve(&self, key: SettingKey) -> String;
}

/// The static key table, optionally with per-key overrides.
///
/// # Examples
///
/// ```
/// use screenrec_domain::recording_settings::{KeyResolver, SettingKey, StaticKeyResolver};
///
/// let resolver = StaticKeyResolver::new().with_override(SettingKey::Fps, "pref_fps");
/// assert_eq!(resolver.resolve(SettingKey::Fps), "pref_fps");
/// assert_eq!(resolver.resolve(SettingKey::VideoBitrate), "bitrate");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticKeyResolver {
    overrides: HashMap<SettingKey, String>,
}

impl StaticKeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: SettingKey, store_key: impl Into<String>) -> Self {
        self.overrides.insert(key, store_key.into());
        self
    }
}

impl KeyResolver for StaticKeyResolver {
    fn resolve(&self, key: SettingKey) -> String {
        self.overrides
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_store_key().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_store_keys_are_unique() {
        let keys: HashSet<&str> = SettingKey::ALL.iter().map(|k| k.default_store_key()).collect();
        assert_eq!(keys.len(), SettingKey::ALL.len());
    }

    #[test]
    fn override_applies_to_one_key_only() {
        let resolver = StaticKeyResolver::new().with_override(SettingKey::SortBy, "library_sort");
        assert_eq!(resolver.resolve(SettingKey::SortBy), "library_sort");
        assert_eq!(resolver.resolve(SettingKey::OrderBy), "order_by");
    }
}
