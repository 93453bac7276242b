//! Session facade: resolves the effective user and coordinates mutations.
//!
//! All collaborators are injected: the transport, the preference store, the
//! session store, the navigation context, and the credential notifier. The
//! read side derives its answers on every call; the write side runs each
//! mutation through [`normalize`](crate::merge::normalize) so the store only
//! ever holds merged records.

use std::sync::Arc;

use mnemo_core::{
    LocalSetting, RawSettingEntry, SessionView, User, UserDelete, UserId, UserPatch,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::UserApi;
use crate::error::Result;
use crate::merge::normalize;
use crate::navigation::NavigationContext;
use crate::notify::CredentialNotifier;
use crate::prefs::PreferenceStore;
use crate::store::{SessionStore, StoreAction};

/// Client-side user session.
pub struct UserSession {
    api: Arc<dyn UserApi>,
    prefs: Arc<dyn PreferenceStore>,
    notifier: Arc<dyn CredentialNotifier>,
    store: SessionStore,
    nav: NavigationContext,
}

impl UserSession {
    pub fn new(
        api: Arc<dyn UserApi>,
        prefs: Arc<dyn PreferenceStore>,
        notifier: Arc<dyn CredentialNotifier>,
        store: SessionStore,
        nav: NavigationContext,
    ) -> Self {
        Self {
            api,
            prefs,
            notifier,
            store,
            nav,
        }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The navigation context handle.
    pub fn navigation(&self) -> &NavigationContext {
        &self.nav
    }

    // -------------------------------------------------------------------------
    // Resolver (read side)
    // -------------------------------------------------------------------------

    /// Whether the viewer is browsing without being authenticated as the
    /// profile currently viewed: nobody is signed in, or the path points at
    /// a different user than the authenticated one.
    pub async fn is_visitor_mode(&self) -> bool {
        match self.store.current_user().await {
            None => true,
            Some(user) => match self.nav.viewed_user_id() {
                Some(viewed) => viewed != user.id,
                None => false,
            },
        }
    }

    /// The effective user id: the viewed profile's id in visitor mode, the
    /// authenticated id otherwise, `UserId::UNKNOWN` when neither is known.
    pub async fn current_user_id(&self) -> UserId {
        if self.is_visitor_mode().await {
            self.nav.viewed_user_id().unwrap_or(UserId::UNKNOWN)
        } else {
            self.store
                .current_user()
                .await
                .map(|user| user.id)
                .unwrap_or(UserId::UNKNOWN)
        }
    }

    /// The full derived session view.
    pub async fn session_view(&self) -> SessionView {
        SessionView {
            is_visitor: self.is_visitor_mode().await,
            effective_user_id: self.current_user_id().await,
            viewed_user_id: self.nav.viewed_user_id(),
        }
    }

    // -------------------------------------------------------------------------
    // Mutation coordinator (write side)
    // -------------------------------------------------------------------------

    /// Establish initial session state: normalize the pre-seeded host record
    /// (if the instance has one), then probe for the authenticated user and
    /// let their settings drive locale and appearance.
    pub async fn initialize(&self) -> Result<()> {
        let system_status = self.store.state().await.global.system_status;
        if let Some(host) = system_status.host {
            let host = normalize(host, self.prefs.as_ref())?;
            self.store.dispatch(StoreAction::SetHost(host)).await;
        }

        if let Some(raw) = self.api.myself().await? {
            let user = normalize(raw, self.prefs.as_ref())?;
            let locale = user.setting.locale.clone();
            let appearance = user.setting.appearance;

            self.store.dispatch(StoreAction::SetCurrentUser(user)).await;
            if !locale.is_empty() {
                self.store.dispatch(StoreAction::SetLocale(locale)).await;
            }
            self.store
                .dispatch(StoreAction::SetAppearance(appearance))
                .await;
        }
        Ok(())
    }

    /// Fetch the authoritative current user and store the merged record.
    ///
    /// A response without a user means "not authenticated" and triggers
    /// [`sign_out`](Self::sign_out) instead of storing anything. Returns the
    /// raw fetched record.
    pub async fn sign_in(&self) -> Result<Option<User>> {
        match self.api.myself().await? {
            Some(raw) => {
                let user = normalize(raw.clone(), self.prefs.as_ref())?;
                info!(user_id = %user.id, "Signed in");
                self.store.dispatch(StoreAction::SetCurrentUser(user)).await;
                Ok(Some(raw))
            }
            None => {
                debug!("No authenticated user, signing out");
                self.sign_out().await?;
                Ok(None)
            }
        }
    }

    /// Notify the server that the session ends. Store state is left alone;
    /// clearing it is the caller's decision.
    pub async fn sign_out(&self) -> Result<()> {
        self.api.signout().await
    }

    /// Fetch a user by id into the id-keyed cache. Returns the merged
    /// record, or `None` (without dispatching) when no such user exists.
    pub async fn user_by_id(&self, id: UserId) -> Result<Option<User>> {
        match self.api.user_by_id(id).await? {
            Some(raw) => {
                let user = normalize(raw, self.prefs.as_ref())?;
                self.store
                    .dispatch(StoreAction::SetUserById(user.clone()))
                    .await;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Store one server-side setting, then refresh the whole session so the
    /// new value round-trips through normalization instead of being patched
    /// locally.
    pub async fn upsert_setting<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let entry = RawSettingEntry::new(key, serde_json::to_string(value)?);
        self.api.upsert_setting(&entry).await?;
        self.sign_in().await?;
        Ok(())
    }

    /// Persist the client-only setting and patch it into the in-memory
    /// record. Never talks to the server.
    pub async fn upsert_local_setting(&self, setting: LocalSetting) -> Result<()> {
        self.prefs.set_local_setting(&setting)?;
        self.store
            .dispatch(StoreAction::PatchLocalSetting(setting))
            .await;
        Ok(())
    }

    /// Apply a profile patch.
    ///
    /// The response only reaches the store when the patch targets the
    /// authenticated self. A changed open-API token fires a rotation
    /// notification, and a patched password fires a password notification;
    /// both are fire-and-forget and cannot fail this call.
    pub async fn patch_user(&self, patch: UserPatch) -> Result<()> {
        let old_open_id = self
            .store
            .current_user()
            .await
            .map(|user| user.open_id);

        let data = self.api.patch_user(&patch).await?;

        let current_id = self.store.current_user().await.map(|user| user.id);
        if current_id == Some(patch.id) {
            let user = normalize(data.clone(), self.prefs.as_ref())?;
            self.store.dispatch(StoreAction::SetCurrentUser(user)).await;

            if old_open_id.as_deref() != Some(data.open_id.as_str()) {
                self.notifier
                    .token_rotated(old_open_id, data.open_id.clone());
            }
            if let Some(password) = patch.password {
                self.notifier.password_changed(data.open_id, password);
            }
        }
        Ok(())
    }

    /// Delete a user. The store is not updated.
    pub async fn delete_user(&self, delete: &UserDelete) -> Result<()> {
        self.api.delete_user(delete).await
    }
}
