//! Value types exposed by the preference facade.
//!
//! Each enum knows the exact string it is persisted as (`as_str`) and how to read one
//! back (`parse`). Parsing returns `None` for unknown input; the accessor layer decides
//! what the fallback is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// App theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightMode {
    #[default]
    SystemDefault,
    Light,
    Dark,
}

impl NightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NightMode::SystemDefault => "system_default",
            NightMode::Light => "light",
            NightMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system_default" => Some(NightMode::SystemDefault),
            "light" => Some(NightMode::Light),
            "dark" => Some(NightMode::Dark),
            _ => None,
        }
    }
}

/// Requested capture orientation.
///
/// `Auto` follows the current screen rotation; the other two pin the output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    #[default]
    Auto,
    Portrait,
    Landscape,
}

impl OrientationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationMode::Auto => "auto",
            OrientationMode::Portrait => "portrait",
            OrientationMode::Landscape => "landscape",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(OrientationMode::Auto),
            "portrait" => Some(OrientationMode::Portrait),
            "landscape" => Some(OrientationMode::Landscape),
            _ => None,
        }
    }
}

/// Where recordings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveLocationKind {
    /// The shared media collection managed by the platform.
    MediaStoreLocation,
    /// A directory tree the user picked explicitly.
    UserPickedLocation,
}

impl SaveLocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveLocationKind::MediaStoreLocation => "MediaStoreLocation",
            SaveLocationKind::UserPickedLocation => "UserPickedLocation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MediaStoreLocation" => Some(SaveLocationKind::MediaStoreLocation),
            "UserPickedLocation" => Some(SaveLocationKind::UserPickedLocation),
            _ => None,
        }
    }
}

/// A persisted save location. Only ever constructed with both parts present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaveLocation {
    pub uri: String,
    pub kind: SaveLocationKind,
}

impl SaveLocation {
    pub fn new(uri: impl Into<String>, kind: SaveLocationKind) -> Self {
        Self { uri: uri.into(), kind }
    }
}

/// Sort key for the recordings library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortBy {
    Name,
    #[default]
    Date,
    Duration,
    Size,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Date => "date",
            SortBy::Duration => "duration",
            SortBy::Size => "size",
        }
    }

    /// Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortBy::Name),
            "date" => Some(SortBy::Date),
            "duration" => Some(SortBy::Duration),
            "size" => Some(SortBy::Size),
            _ => None,
        }
    }
}

/// Sort direction for the recordings library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderBy {
    Ascending,
    #[default]
    Descending,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Ascending => "ascending",
            OrderBy::Descending => "descending",
        }
    }

    /// Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ascending" => Some(OrderBy::Ascending),
            "descending" => Some(OrderBy::Descending),
            _ => None,
        }
    }
}

/// One immutable sort/order snapshot. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortOrderOptions {
    pub sort_by: SortBy,
    pub order_by: OrderBy,
}

impl SortOrderOptions {
    pub fn new(sort_by: SortBy, order_by: OrderBy) -> Self {
        Self { sort_by, order_by }
    }
}

/// Capture size in pixels, already oriented for the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn swapped(&self) -> Self {
        Self { width: self.height, height: self.width }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
