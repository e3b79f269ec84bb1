//! Derived capture settings.
//!
//! Nothing here is cached: every call reads the store and the device again, so a
//! rotation or a preference change is reflected on the next read.

use tracing::{debug, info};

use super::accessors::{SettingsAccess, FIRST_RUN, ORIENTATION, RESOLUTION_WIDTH};
use super::device_iface::DeviceInfo;
use super::types::{OrientationMode, Resolution};

/// Long side over short side of the physical panel, always at least 1.0.
pub fn aspect_ratio(device: &dyn DeviceInfo) -> f64 {
    device.real_display_metrics().aspect_ratio()
}

/// The stored capture width, or the current display width when none is stored.
pub fn video_width(access: &SettingsAccess, device: &dyn DeviceInfo) -> u32 {
    RESOLUTION_WIDTH
        .read_stored(access)
        .unwrap_or_else(|| device.display_metrics().width_px)
}

/// Capture resolution for the current orientation preference and screen rotation.
///
/// The height is `round(width * aspect_ratio)`. Under [`OrientationMode::Auto`] the pair
/// is `(width, height)` at 0° and 180° and swapped otherwise; `Portrait` always yields
/// `(width, height)` and `Landscape` always `(height, width)`.
pub fn resolution(access: &SettingsAccess, device: &dyn DeviceInfo) -> Resolution {
    let width = video_width(access, device);
    let height = (f64::from(width) * aspect_ratio(device)).round() as u32;
    let natural = Resolution::new(width, height);

    let oriented = match ORIENTATION.read(access) {
        OrientationMode::Portrait => natural,
        OrientationMode::Landscape => natural.swapped(),
        OrientationMode::Auto if device.rotation().is_natural() => natural,
        OrientationMode::Auto => natural.swapped(),
    };
    debug!("Derived capture resolution {} (rotation {})", oriented, device.rotation());
    oriented
}

/// Largest candidate not exceeding `real_width`, or `real_width` itself when none fits.
///
/// `candidates` may be in any order.
pub fn pick_initial_width(candidates: &[u32], real_width: u32) -> u32 {
    candidates
        .iter()
        .copied()
        .filter(|w| *w <= real_width)
        .max()
        .unwrap_or(real_width)
}

/// Chooses and persists an initial capture width while the first-run flag is set, then
/// clears the flag.
///
/// # Returns
///
/// `true` if initialization ran, `false` if it had already happened.
pub fn initialize_on_first_run(access: &SettingsAccess, device: &dyn DeviceInfo, candidates: &[u32]) -> bool {
    if !FIRST_RUN.read(access) {
        debug!("First-run initialization already done");
        return false;
    }
    let real_width = device.real_display_metrics().width_px;
    let width = pick_initial_width(candidates, real_width);
    RESOLUTION_WIDTH.write(access, width);
    FIRST_RUN.write(access, false);
    info!("First run: capture width set to {} for a {}px wide panel", width, real_width);
    true
}
