//! Transport contract for the user API.
//!
//! Session logic depends only on this trait; the HTTP implementation lives
//! in [`crate::http`]. "No user" is a non-error signal (`Ok(None)`),
//! distinct from a transport failure.

use async_trait::async_trait;
use mnemo_core::{RawSettingEntry, User, UserDelete, UserId, UserPatch};

use crate::error::Result;

/// Remote user API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the authenticated user, or `None` when the session is
    /// anonymous.
    async fn myself(&self) -> Result<Option<User>>;

    /// Fetch a user by id, or `None` when no such user exists.
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Apply a partial profile update and return the updated record.
    async fn patch_user(&self, patch: &UserPatch) -> Result<User>;

    /// Store one raw setting entry for the authenticated user.
    async fn upsert_setting(&self, entry: &RawSettingEntry) -> Result<()>;

    /// Delete a user.
    async fn delete_user(&self, delete: &UserDelete) -> Result<()>;

    /// Invalidate the server-side session.
    async fn signout(&self) -> Result<()>;
}
