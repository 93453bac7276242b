//! Mnemo Core
//!
//! Platform-agnostic domain types for Mnemo clients.
//!
//! This crate defines the user and settings model shared by every client
//! surface: the `User` record as the server reports it, the normalized
//! `UserSetting` merged from server-side key/value entries, and the
//! client-only `LocalSetting` that never leaves the device.
//!
//! # Example
//!
//! ```rust
//! use mnemo_core::{LocalSetting, UserId, UserSetting};
//!
//! // Fixed defaults a fresh client starts from
//! let setting = UserSetting::default();
//! assert_eq!(setting.locale, "en");
//!
//! let local = LocalSetting::default();
//! assert!(local.enable_double_click_editing);
//!
//! // Sentinel id for "no known user"
//! assert_eq!(UserId::UNKNOWN.as_i64(), -1);
//! ```

#![forbid(unsafe_code)]

pub mod types;

// Re-export commonly used types
pub use types::{
    Appearance, LocalSetting, LocalSettingPatch, RawSettingEntry, Role, SessionView, User,
    UserDelete, UserId, UserPatch, UserSetting, Visibility,
};
