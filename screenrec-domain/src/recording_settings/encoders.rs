//! Encoder selection gated on the platform version.
//!
//! Some encoders only exist on newer platforms. When the stored choice is not available
//! on the running device, the stored value is reset to `default` first and the read then
//! fails with [`PreferenceError::Capability`]. The next read therefore returns a value
//! the device can use.

use screenrec_core::types::PlatformVersion;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::accessors::SettingsAccess;
use super::device_iface::DeviceInfo;
use super::errors::PreferenceError;
use super::keys::SettingKey;
use super::persistence_iface::PrefValue;

/// An encoder choice persisted as a symbolic string.
pub trait GatedEncoder: Copy + Sized {
    const KEY: SettingKey;
    const DEFAULT: Self;

    /// Maps a stored string; unknown strings map to the fallback encoder.
    fn from_stored(value: &str) -> Self;
    fn as_stored(&self) -> &'static str;
    /// Platform codec constant handed to the recorder.
    fn codec_constant(&self) -> i32;
    fn min_platform(&self) -> Option<PlatformVersion>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VideoEncoder {
    #[default]
    Default,
    H264,
    Vp8,
    Hevc,
}

impl GatedEncoder for VideoEncoder {
    const KEY: SettingKey = SettingKey::VideoEncoder;
    const DEFAULT: Self = VideoEncoder::Default;

    fn from_stored(value: &str) -> Self {
        match value {
            "default" => VideoEncoder::Default,
            "H264" => VideoEncoder::H264,
            "HEVC" => VideoEncoder::Hevc,
            "VP8" => VideoEncoder::Vp8,
            _ => VideoEncoder::H264,
        }
    }

    fn as_stored(&self) -> &'static str {
        match self {
            VideoEncoder::Default => "default",
            VideoEncoder::H264 => "H264",
            VideoEncoder::Vp8 => "VP8",
            VideoEncoder::Hevc => "HEVC",
        }
    }

    fn codec_constant(&self) -> i32 {
        match self {
            VideoEncoder::Default => 0,
            VideoEncoder::H264 => 2,
            VideoEncoder::Vp8 => 4,
            VideoEncoder::Hevc => 5,
        }
    }

    fn min_platform(&self) -> Option<PlatformVersion> {
        match self {
            VideoEncoder::Hevc => Some(PlatformVersion::N),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioEncoder {
    #[default]
    Default,
    Aac,
    Vorbis,
    Opus,
}

impl GatedEncoder for AudioEncoder {
    const KEY: SettingKey = SettingKey::AudioEncoder;
    const DEFAULT: Self = AudioEncoder::Default;

    fn from_stored(value: &str) -> Self {
        match value {
            "default" => AudioEncoder::Default,
            "aac" => AudioEncoder::Aac,
            "opus" => AudioEncoder::Opus,
            "vorbis" => AudioEncoder::Vorbis,
            _ => AudioEncoder::Aac,
        }
    }

    fn as_stored(&self) -> &'static str {
        match self {
            AudioEncoder::Default => "default",
            AudioEncoder::Aac => "aac",
            AudioEncoder::Vorbis => "vorbis",
            AudioEncoder::Opus => "opus",
        }
    }

    fn codec_constant(&self) -> i32 {
        match self {
            AudioEncoder::Default => 0,
            AudioEncoder::Aac => 3,
            AudioEncoder::Vorbis => 6,
            AudioEncoder::Opus => 7,
        }
    }

    fn min_platform(&self) -> Option<PlatformVersion> {
        match self {
            AudioEncoder::Opus => Some(PlatformVersion::Q),
            _ => None,
        }
    }
}

/// Reads the stored encoder and checks it against the device's platform version.
///
/// An absent entry, or one that is not a string, reads as the default encoder.
///
/// # Errors
///
/// [`PreferenceError::Capability`] when the device is too old for the stored encoder.
/// The stored value has been reset to `default` by the time this is returned.
pub fn read_encoder<E: GatedEncoder>(access: &SettingsAccess, device: &dyn DeviceInfo) -> Result<E, PreferenceError> {
    let encoder = match access.get_string(E::KEY) {
        Some(stored) => E::from_stored(&stored),
        None => E::DEFAULT,
    };

    if let Some(required) = encoder.min_platform() {
        let actual = device.platform_version();
        if actual < required {
            warn!(
                "Encoder {} requires {} but device runs {}; resetting {} to default",
                encoder.as_stored(),
                required,
                actual,
                E::KEY
            );
            write_encoder(access, E::DEFAULT);
            return Err(PreferenceError::Capability {
                encoder: encoder.as_stored().to_string(),
                required,
                actual,
            });
        }
    }
    debug!("Selected {} encoder {}", E::KEY, encoder.as_stored());
    Ok(encoder)
}

pub fn write_encoder<E: GatedEncoder>(access: &SettingsAccess, encoder: E) {
    access.set_raw(E::KEY, PrefValue::from(encoder.as_stored()));
}
