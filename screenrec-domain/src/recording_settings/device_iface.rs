// screenrec-domain/src/recording_settings/device_iface.rs
use screenrec_core::types::{DisplayMetrics, PlatformVersion, Rotation};

/// Live device state read by the derivation engine.
///
/// Values are queried on every derived read and never cached.
pub trait DeviceInfo: Send + Sync {
    /// Metrics of the area visible to the app, which may exclude system bars.
    fn display_metrics(&self) -> DisplayMetrics;

    /// Physical panel metrics. Defaults to [`DeviceInfo::display_metrics`].
    fn real_display_metrics(&self) -> DisplayMetrics {
        self.display_metrics()
    }

    fn rotation(&self) -> Rotation;

    fn platform_version(&self) -> PlatformVersion;
}
