//! Screen rotation.
//!
//! [`Rotation`] describes how far the display content is currently rotated from the
//! device's natural orientation, in clockwise quarter turns.
//!
//! # Examples
//!
//! ```
//! use screenrec_core::types::Rotation;
//!
//! let rotation = Rotation::from_degrees(270).unwrap();
//! assert_eq!(rotation, Rotation::Rotation270);
//! assert!(!rotation.is_natural());
//! assert_eq!(format!("{}", rotation), "270°");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current display rotation relative to the natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl Rotation {
    /// Converts a degree value into a rotation.
    ///
    /// Values are normalised modulo 360, so `-90` maps to [`Rotation::Rotation270`].
    ///
    /// # Returns
    ///
    /// `None` if the normalised value is not a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Rotation0),
            90 => Some(Rotation::Rotation90),
            180 => Some(Rotation::Rotation180),
            270 => Some(Rotation::Rotation270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Rotation0 => 0,
            Rotation::Rotation90 => 90,
            Rotation::Rotation180 => 180,
            Rotation::Rotation270 => 270,
        }
    }

    /// `true` for 0° and 180°, where width and height keep their natural meaning.
    pub fn is_natural(&self) -> bool {
        matches!(self, Rotation::Rotation0 | Rotation::Rotation180)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
