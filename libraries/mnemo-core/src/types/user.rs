/// User domain types
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::setting::{LocalSetting, UserSetting};

/// Account role as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Host,
    #[default]
    User,
}

/// A user record.
///
/// Carries the server's profile fields plus, once normalized, the merged
/// [`UserSetting`] and [`LocalSetting`] objects. Records are never mutated
/// in place; every transformation builds a new one.
///
/// `created_ts` / `updated_ts` are seconds since epoch on the wire and
/// milliseconds after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub role: Role,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    /// Open-API credential token.
    #[serde(default)]
    pub open_id: String,
    pub created_ts: i64,
    pub updated_ts: i64,
    /// Raw key/value settings as stored server-side.
    #[serde(rename = "userSettingList", default, skip_serializing_if = "Option::is_none")]
    pub setting_list: Option<Vec<RawSettingEntry>>,
    /// Merged server-backed settings, populated by normalization.
    #[serde(default)]
    pub setting: UserSetting,
    /// Merged client-only settings, populated by normalization.
    #[serde(default)]
    pub local_setting: LocalSetting,
}

/// Server representation of one setting: a key plus a JSON-encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSettingEntry {
    pub key: String,
    pub value: String,
}

impl RawSettingEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Partial profile update for the patch endpoint. Absent fields stay
/// untouched server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserPatch {
    /// Empty patch for the given user.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            nickname: None,
            email: None,
            avatar_url: None,
            password: None,
        }
    }
}

/// Deletion request for the delete endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDelete {
    pub id: UserId,
}

impl UserDelete {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// Derived view of who the effective user is. Computed on demand from store
/// state and navigation context, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    /// The viewer is not authenticated as the profile being viewed.
    pub is_visitor: bool,
    pub effective_user_id: UserId,
    /// Id parsed from the current navigation path, if any.
    pub viewed_user_id: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_from_server_json() {
        let raw = serde_json::json!({
            "id": 7,
            "role": "HOST",
            "username": "alice",
            "nickname": "Alice",
            "email": "alice@example.com",
            "avatarUrl": "",
            "openId": "token-1",
            "createdTs": 1_700_000_000i64,
            "updatedTs": 1_700_000_100i64,
            "userSettingList": [
                { "key": "locale", "value": "\"fr\"" }
            ]
        });

        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.role, Role::Host);
        assert_eq!(user.open_id, "token-1");
        let entries = user.setting_list.as_deref().unwrap();
        assert_eq!(entries[0].key, "locale");
        // Merged fields default until normalization runs
        assert_eq!(user.setting.locale, "en");
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let mut patch = UserPatch::new(UserId::new(3));
        patch.nickname = Some("Bob".to_string());

        let encoded = serde_json::to_value(&patch).unwrap();
        assert_eq!(encoded, serde_json::json!({ "id": 3, "nickname": "Bob" }));
    }
}
