//! In-memory session store.
//!
//! The store owns the canonical user records: the authenticated self, the
//! seeded host, and an id-keyed cache of other users, plus the global slice
//! (locale, appearance, system status) that session operations drive. It is
//! a cheaply clonable handle; every consumer gets the same state.

use std::collections::HashMap;
use std::sync::Arc;

use mnemo_core::{Appearance, LocalSetting, User, UserId};
use tokio::sync::{watch, RwLock};

/// User slice: the records this module reconciles.
#[derive(Debug, Clone, Default)]
pub struct UserState {
    /// The instance host, seeded from system status.
    pub host: Option<User>,
    /// The authenticated self.
    pub current: Option<User>,
    /// Other users fetched by id.
    pub by_id: HashMap<UserId, User>,
}

/// Instance status as reported by the server at bootstrap.
#[derive(Debug, Clone, Default)]
pub struct SystemStatus {
    /// Raw (un-normalized) host record, if the instance has one.
    pub host: Option<User>,
}

/// Global slice: app-wide values the session drives on sign-in.
#[derive(Debug, Clone)]
pub struct GlobalState {
    pub locale: String,
    pub appearance: Appearance,
    pub system_status: SystemStatus,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            appearance: Appearance::default(),
            system_status: SystemStatus::default(),
        }
    }
}

/// Complete store state.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub user: UserState,
    pub global: GlobalState,
}

/// A state transition. Dispatching applies it atomically.
#[derive(Debug, Clone)]
pub enum StoreAction {
    SetHost(User),
    SetCurrentUser(User),
    SetUserById(User),
    /// Replace the current user's local setting, leaving the rest of the
    /// record alone. No-op when nobody is signed in.
    PatchLocalSetting(LocalSetting),
    SetLocale(String),
    SetAppearance(Appearance),
    SetSystemStatus(SystemStatus),
}

/// Shared handle to the session store.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<StoreState>>,
    current_tx: Arc<watch::Sender<Option<User>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (current_tx, _) = watch::channel(None);
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            current_tx: Arc::new(current_tx),
        }
    }

    /// Snapshot of the full state.
    pub async fn state(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// The authenticated self, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.current.clone()
    }

    /// A cached user fetched by id.
    pub async fn user_by_id(&self, id: UserId) -> Option<User> {
        self.state.read().await.user.by_id.get(&id).cloned()
    }

    /// Watch the current-user slice. The receiver sees the value after each
    /// dispatch that ran while it was alive.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current_tx.subscribe()
    }

    /// Apply one action.
    ///
    /// The write lock is held only for the duration of a single dispatch,
    /// never across an await point. Overlapping operations therefore
    /// interleave freely and the last dispatch to complete determines the
    /// final state; there is no versioning.
    pub async fn dispatch(&self, action: StoreAction) {
        let mut state = self.state.write().await;
        match action {
            StoreAction::SetHost(user) => state.user.host = Some(user),
            StoreAction::SetCurrentUser(user) => state.user.current = Some(user),
            StoreAction::SetUserById(user) => {
                state.user.by_id.insert(user.id, user);
            }
            StoreAction::PatchLocalSetting(local_setting) => {
                if let Some(current) = state.user.current.as_mut() {
                    current.local_setting = local_setting;
                }
            }
            StoreAction::SetLocale(locale) => state.global.locale = locale,
            StoreAction::SetAppearance(appearance) => state.global.appearance = appearance,
            StoreAction::SetSystemStatus(status) => state.global.system_status = status,
        }
        self.current_tx.send_replace(state.user.current.clone());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
