//! Library view preferences: where recordings are saved and how they are listed.
//!
//! The save location is stored as two entries, a URI and a kind string. It only exists
//! when both are present; a half-present pair reads as `None`. A kind string that is not
//! one of the known kinds is an error rather than a silent default.

use tracing::warn;

use super::accessors::{SettingsAccess, ORDER_BY, SORT_BY};
use super::errors::PreferenceError;
use super::keys::SettingKey;
use super::persistence_iface::PrefValue;
use super::types::{SaveLocation, SaveLocationKind, SortOrderOptions};

/// Reads the persisted save location.
///
/// # Errors
///
/// [`PreferenceError::UnrecognizedLocationKind`] if both entries exist and the kind string
/// is unknown.
pub fn read_save_location(access: &SettingsAccess) -> Result<Option<SaveLocation>, PreferenceError> {
    let uri = access.get_string(SettingKey::SaveLocationUri);
    let kind = access.get_string(SettingKey::SaveLocationKind);
    match (uri, kind) {
        (Some(uri), Some(kind)) => match SaveLocationKind::parse(&kind) {
            Some(kind) => Ok(Some(SaveLocation { uri, kind })),
            None => Err(PreferenceError::UnrecognizedLocationKind { kind }),
        },
        (None, None) => Ok(None),
        (uri, kind) => {
            warn!(
                "Save location is only partially stored (uri present: {}, kind present: {}); treating as unset",
                uri.is_some(),
                kind.is_some()
            );
            Ok(None)
        }
    }
}

pub fn write_save_location(access: &SettingsAccess, location: &SaveLocation) {
    access.set_raw(SettingKey::SaveLocationUri, PrefValue::from(location.uri.as_str()));
    access.set_raw(SettingKey::SaveLocationKind, PrefValue::from(location.kind.as_str()));
}

pub fn clear_save_location(access: &SettingsAccess) {
    access.remove(SettingKey::SaveLocationUri);
    access.remove(SettingKey::SaveLocationKind);
}

/// Current sort/order snapshot. Unknown stored strings fall back per field.
pub fn read_sort_order(access: &SettingsAccess) -> SortOrderOptions {
    SortOrderOptions { sort_by: SORT_BY.read(access), order_by: ORDER_BY.read(access) }
}

pub fn write_sort_order(access: &SettingsAccess, options: SortOrderOptions) {
    SORT_BY.write(access, options.sort_by);
    ORDER_BY.write(access, options.order_by);
}
