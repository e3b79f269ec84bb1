//! The key-value store the preference facade sits on.
//!
//! Durability and on-disk format belong to the store implementation; the facade only
//! needs untyped reads and writes plus change callbacks. Type coercion happens in
//! [`super::accessors`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A raw, untyped store entry. Absence is modelled as `Option::None` by the store API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PrefValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{}", b),
            PrefValue::Int(i) => write!(f, "{}", i),
            PrefValue::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Str(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Str(value)
    }
}

/// Callback invoked with the store key of every changed entry.
pub type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Registration token returned by [`PreferenceStore::on_change`].
///
/// Not `Clone`: handing it back to [`PreferenceStore::off_change`] consumes it, so a
/// registration can be released only once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Synchronous key-value store with change notification.
///
/// Implementations must not invoke change callbacks while holding locks that
/// `get_raw` needs, since callbacks read the store.
///
/// Nor may they invoke callbacks while holding a lock that `on_change` or `off_change`
/// takes. Change hubs register listeners while holding their own lock, and their
/// callbacks take that same lock, so a store that notifies under its listener lock can
/// deadlock against a concurrent subscribe.
pub trait PreferenceStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Option<PrefValue>;

    /// Writes `value`; the write is visible to the next `get_raw`.
    fn set_raw(&self, key: &str, value: PrefValue);

    fn remove(&self, key: &str);

    fn on_change(&self, callback: ChangeCallback) -> ListenerHandle;

    fn off_change(&self, handle: ListenerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(PrefValue::from("30").as_str(), Some("30"));
        assert_eq!(PrefValue::from(true).as_bool(), Some(true));
        assert_eq!(PrefValue::from(7_i64).as_int(), Some(7));
        assert_eq!(PrefValue::from(7_i64).as_str(), None);
        assert_eq!(PrefValue::from("true").as_bool(), None);
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_string(&PrefValue::Bool(false)).unwrap(), "false");
        assert_eq!(serde_json::to_string(&PrefValue::Int(44100)).unwrap(), "44100");
        assert_eq!(serde_json::from_str::<PrefValue>("\"H264\"").unwrap(), PrefValue::from("H264"));
    }
}
