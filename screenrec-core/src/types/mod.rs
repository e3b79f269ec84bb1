//! Device-state value types.
//!
//! These describe what the preference derivation reads from the device: the display
//! size ([`DisplayMetrics`]), its rotation ([`Rotation`]) and the platform API level
//! ([`PlatformVersion`]).

pub mod display;
pub mod platform;
pub mod rotation;

pub use display::DisplayMetrics;
pub use platform::PlatformVersion;
pub use rotation::Rotation;
