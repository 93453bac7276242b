/// User setting types: the normalized server-backed settings and the
/// client-only local settings.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// UI appearance. `System` defers to the host color scheme at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    System,
    Light,
    Dark,
}

/// Visibility of a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
}

/// Normalized server-backed user settings.
///
/// Every known field is always populated: values the server does not report
/// keep their fixed default. Keys the server reports that this client does
/// not know about are carried opaquely in `extras` so a newer server can
/// introduce settings without breaking older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSetting {
    pub locale: String,
    pub appearance: Appearance,
    pub memo_visibility: Visibility,
    pub telegram_user_id: String,
    /// Server settings with no typed field on this client.
    #[serde(flatten)]
    pub extras: BTreeMap<String, Value>,
}

impl Default for UserSetting {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            appearance: Appearance::default(),
            memo_visibility: Visibility::default(),
            telegram_user_id: String::new(),
            extras: BTreeMap::new(),
        }
    }
}

impl UserSetting {
    /// Assign one decoded server value under its normalized key.
    ///
    /// Known keys land on the typed field; anything else goes into `extras`
    /// untouched. Fails when a known key carries a value of the wrong shape.
    pub fn assign(&mut self, key: &str, value: Value) -> serde_json::Result<()> {
        match key {
            "locale" => self.locale = serde_json::from_value(value)?,
            "appearance" => self.appearance = serde_json::from_value(value)?,
            "memo_visibility" => self.memo_visibility = serde_json::from_value(value)?,
            "telegram_user_id" => self.telegram_user_id = serde_json::from_value(value)?,
            _ => {
                self.extras.insert(key.to_owned(), value);
            }
        }
        Ok(())
    }
}

/// Client-only settings, persisted on the device and never sent to the
/// server. Disjoint from [`UserSetting`]: merging one never touches the
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSetting {
    pub enable_double_click_editing: bool,
    /// Hours from midnight for the daily review reminder.
    pub daily_review_time_offset: i32,
    pub enable_auto_collapse: bool,
}

impl Default for LocalSetting {
    fn default() -> Self {
        Self {
            enable_double_click_editing: true,
            daily_review_time_offset: 0,
            enable_auto_collapse: true,
        }
    }
}

/// Stored overlay for [`LocalSetting`].
///
/// Persisted storage may hold any subset of the fields; applying the overlay
/// starts from the defaults so absent or `null` entries never erase them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalSettingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_double_click_editing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_review_time_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_collapse: Option<bool>,
}

impl LocalSettingPatch {
    /// Overlay the stored fields onto `base`, leaving absent fields alone.
    pub fn apply_to(&self, base: &mut LocalSetting) {
        if let Some(v) = self.enable_double_click_editing {
            base.enable_double_click_editing = v;
        }
        if let Some(v) = self.daily_review_time_offset {
            base.daily_review_time_offset = v;
        }
        if let Some(v) = self.enable_auto_collapse {
            base.enable_auto_collapse = v;
        }
    }
}

impl From<&LocalSetting> for LocalSettingPatch {
    fn from(setting: &LocalSetting) -> Self {
        Self {
            enable_double_click_editing: Some(setting.enable_double_click_editing),
            daily_review_time_offset: Some(setting.daily_review_time_offset),
            enable_auto_collapse: Some(setting.enable_auto_collapse),
        }
    }
}
