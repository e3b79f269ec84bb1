// screenrec-core/src/types/display.rs

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a display as reported by the platform.
///
/// The values are taken as-is; which side is longer depends on the current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub width_px: u32,
    pub height_px: u32,
}

impl DisplayMetrics {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self { width_px, height_px }
    }

    /// Long side divided by short side, so the result is always at least 1.0.
    ///
    /// A panel with a zero-length side yields 1.0.
    ///
    /// ```
    /// use screenrec_core::types::DisplayMetrics;
    /// let ratio = DisplayMetrics::new(1080, 1920).aspect_ratio();
    /// assert!((ratio - 16.0 / 9.0).abs() < 1e-9);
    /// assert_eq!(DisplayMetrics::new(0, 1920).aspect_ratio(), 1.0);
    /// ```
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.width_px.max(self.height_px);
        let short = self.width_px.min(self.height_px);
        if short == 0 {
            return 1.0;
        }
        f64::from(long) / f64::from(short)
    }

    pub fn is_portrait(&self) -> bool {
        self.height_px > self.width_px
    }
}
