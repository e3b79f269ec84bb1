// screenrec-domain/src/recording_settings/errors.rs
use screenrec_core::types::PlatformVersion;
use thiserror::Error;

/// Errors surfaced by the preference facade.
///
/// Unparseable numeric or enum values are not represented here: those reads fall back
/// to their documented defaults and only log at debug level.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// The stored encoder needs a newer platform than the device runs. The stored value
    /// has already been reset to `default` when this is returned.
    #[error("Encoder {encoder} requires platform {required}, but the device runs {actual}")]
    Capability {
        encoder: String,
        required: PlatformVersion,
        actual: PlatformVersion,
    },

    #[error("Unrecognized save location kind '{kind}'")]
    UnrecognizedLocationKind { kind: String },

    #[error("Change stream '{stream}' is closed")]
    HubClosed { stream: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_message_names_encoder_and_levels() {
        let err = PreferenceError::Capability {
            encoder: "HEVC".to_string(),
            required: PlatformVersion::N,
            actual: PlatformVersion(23),
        };
        assert_eq!(err.to_string(), "Encoder HEVC requires platform API 24, but the device runs API 23");
    }

    #[test]
    fn closed_stream_message_names_stream() {
        assert_eq!(
            PreferenceError::HubClosed { stream: "sort_order".to_string() }.to_string(),
            "Change stream 'sort_order' is closed"
        );
    }
}
