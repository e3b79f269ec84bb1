use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform API level of the running device.
///
/// Ordered numerically, so capability checks read as `version >= PlatformVersion::N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformVersion(pub u32);

impl PlatformVersion {
    /// First level with HEVC encoding support.
    pub const N: PlatformVersion = PlatformVersion(24);
    /// First level with Opus encoding support.
    pub const Q: PlatformVersion = PlatformVersion(29);

    pub fn level(&self) -> u32 {
        self.0
    }

    pub fn at_least(&self, required: PlatformVersion) -> bool {
        *self >= required
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}
