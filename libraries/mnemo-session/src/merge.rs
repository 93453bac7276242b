//! Normalization of raw server user records.
//!
//! This is the merge protocol: one pass that combines the fixed setting
//! defaults, the locally persisted overlay, and the server's raw key/value
//! entries into a fully populated record. Everything downstream reads the
//! merged model only.

use heck::ToSnakeCase;
use mnemo_core::{LocalSetting, User, UserSetting};
use serde_json::Value;

use crate::error::{Result, SessionError};
use crate::prefs::PreferenceStore;

/// Merge a raw server user record into its normalized form.
///
/// - Server settings are applied over a full copy of the defaults, in list
///   order; the last entry for a key wins. Keys unknown to this client are
///   kept opaquely.
/// - The local setting is the stored overlay applied over its defaults; the
///   two namespaces never touch each other.
/// - `created_ts` / `updated_ts` convert from seconds to milliseconds here
///   and nowhere else.
///
/// Idempotent over the settings: feeding a normalized record back in (with
/// its setting list intact) reproduces the same merged values. A setting
/// value that is not valid JSON fails the whole call; there is no
/// partial-entry recovery.
pub fn normalize(user: User, prefs: &dyn PreferenceStore) -> Result<User> {
    let mut setting = UserSetting::default();

    let mut local_setting = LocalSetting::default();
    if let Some(stored) = prefs.local_setting()? {
        stored.apply_to(&mut local_setting);
    }

    if let Some(entries) = &user.setting_list {
        for entry in entries {
            let key = entry.key.to_snake_case();
            let value: Value =
                serde_json::from_str(&entry.value).map_err(|source| SessionError::CorruptSetting {
                    key: entry.key.clone(),
                    source,
                })?;
            setting
                .assign(&key, value)
                .map_err(|source| SessionError::CorruptSetting {
                    key: entry.key.clone(),
                    source,
                })?;
        }
    }

    Ok(User {
        setting,
        local_setting,
        created_ts: user.created_ts * 1000,
        updated_ts: user.updated_ts * 1000,
        ..user
    })
}
