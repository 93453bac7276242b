//! Client-side preference storage.
//!
//! The only field this library stores is the client-local setting overlay;
//! the trait is scoped accordingly. Reads and writes are synchronous.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use mnemo_core::{LocalSetting, LocalSettingPatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SessionError};

/// Persistent storage for client-only preferences.
pub trait PreferenceStore: Send + Sync {
    /// The stored local-setting overlay, if any was ever written.
    fn local_setting(&self) -> Result<Option<LocalSettingPatch>>;

    /// Persist the full local setting, replacing any previous value.
    fn set_local_setting(&self, setting: &LocalSetting) -> Result<()>;
}

/// Ephemeral preference store for tests and stateless embedders.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    inner: RwLock<Option<LocalSettingPatch>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the stored overlay.
    pub fn with_local_setting(patch: LocalSettingPatch) -> Self {
        Self {
            inner: RwLock::new(Some(patch)),
        }
    }
}

impl PreferenceStore for MemoryPrefs {
    fn local_setting(&self) -> Result<Option<LocalSettingPatch>> {
        Ok(self
            .inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn set_local_setting(&self, setting: &LocalSetting) -> Result<()> {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) =
            Some(LocalSettingPatch::from(setting));
        Ok(())
    }
}

/// On-disk document shape. One named field per stored preference, like the
/// keyed browser storage this mirrors.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PrefsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    local_setting: Option<LocalSettingPatch>,
}

/// Preference store backed by a single JSON file.
///
/// The file is created on first write; a missing file reads as "nothing
/// stored".
#[derive(Debug)]
pub struct JsonFilePrefs {
    path: PathBuf,
}

impl JsonFilePrefs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<PrefsDocument> {
        if !self.path.exists() {
            return Ok(PrefsDocument::default());
        }
        let body = fs::read_to_string(&self.path)?;
        serde_json::from_str(&body).map_err(|e| {
            SessionError::Storage(format!(
                "malformed preference file {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl PreferenceStore for JsonFilePrefs {
    fn local_setting(&self) -> Result<Option<LocalSettingPatch>> {
        Ok(self.read_document()?.local_setting)
    }

    fn set_local_setting(&self, setting: &LocalSetting) -> Result<()> {
        let mut document = self.read_document()?;
        document.local_setting = Some(LocalSettingPatch::from(setting));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&document)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), "Persisted local setting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_prefs_round_trip() {
        let prefs = MemoryPrefs::new();
        assert!(prefs.local_setting().unwrap().is_none());

        let setting = LocalSetting {
            daily_review_time_offset: 8,
            ..LocalSetting::default()
        };
        prefs.set_local_setting(&setting).unwrap();

        let stored = prefs.local_setting().unwrap().unwrap();
        assert_eq!(stored.daily_review_time_offset, Some(8));
        assert_eq!(stored.enable_auto_collapse, Some(true));
    }
}
