//! Navigation context: the current path, polled by the session resolver.
//!
//! The app shell writes the path on every route change; the resolver reads
//! it synchronously on every query. Nothing here subscribes to anything.

use std::sync::{Arc, RwLock};

use mnemo_core::UserId;

/// Shared handle to the current navigation path.
#[derive(Debug, Clone, Default)]
pub struct NavigationContext {
    path: Arc<RwLock<String>>,
}

impl NavigationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current path (called by the app shell on route change).
    pub fn set_path(&self, path: impl Into<String>) {
        *self.path.write().unwrap_or_else(|e| e.into_inner()) = path.into();
    }

    /// The current path.
    pub fn path(&self) -> String {
        self.path.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The user id the current path points at, if it is a profile path.
    pub fn viewed_user_id(&self) -> Option<UserId> {
        user_id_from_path(&self.path())
    }
}

/// Parse a profile path of the form `/u/{digits}...` into a user id.
pub fn user_id_from_path(path: &str) -> Option<UserId> {
    let rest = path.strip_prefix("/u/")?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<i64>().ok().map(UserId::new)
}
