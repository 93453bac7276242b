//! HTTP implementation of the user API.

use std::time::Duration;

use async_trait::async_trait;
use mnemo_core::{RawSettingEntry, User, UserDelete, UserId, UserPatch};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::api::UserApi;
use crate::error::{Result, SessionError};

/// Envelope the server wraps every payload in.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// User API over HTTP, speaking the server's `/api/user/*` routes.
pub struct HttpUserApi {
    http: Client,
    base_url: String,
}

impl HttpUserApi {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let url = base_url.into();
        if url.is_empty() {
            return Err(SessionError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SessionError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Mnemo/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SessionError::Request)?;

        Ok(Self {
            http,
            base_url: url,
        })
    }

    /// Get the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transport_error(e: reqwest::Error) -> SessionError {
        if e.is_connect() || e.is_timeout() {
            SessionError::Unreachable(e.to_string())
        } else {
            SessionError::Request(e)
        }
    }

    async fn server_error(response: Response) -> SessionError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        SessionError::Server { status, message }
    }

    /// GET a user from an endpoint where both `{"data": null}` and a
    /// 401/404 status mean "no user".
    async fn fetch_optional_user(&self, url: String) -> Result<Option<User>> {
        debug!(url = %url, "Fetching user");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if status.is_success() {
            let envelope: Envelope<Option<User>> = response.json().await.map_err(|e| {
                SessionError::Parse(format!("Failed to parse user response: {e}"))
            })?;
            Ok(envelope.data)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn expect_ok(response: Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn myself(&self) -> Result<Option<User>> {
        self.fetch_optional_user(format!("{}/api/user/me", self.base_url))
            .await
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<User>> {
        self.fetch_optional_user(format!("{}/api/user/{id}", self.base_url))
            .await
    }

    async fn patch_user(&self, patch: &UserPatch) -> Result<User> {
        let url = format!("{}/api/user/{}", self.base_url, patch.id);
        debug!(url = %url, user_id = %patch.id, "Patching user");

        let response = self
            .http
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status().is_success() {
            let envelope: Envelope<User> = response.json().await.map_err(|e| {
                SessionError::Parse(format!("Failed to parse patch response: {e}"))
            })?;
            Ok(envelope.data)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn upsert_setting(&self, entry: &RawSettingEntry) -> Result<()> {
        let url = format!("{}/api/user/setting", self.base_url);
        debug!(url = %url, key = %entry.key, "Upserting user setting");

        let response = self
            .http
            .post(&url)
            .json(entry)
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::expect_ok(response).await
    }

    async fn delete_user(&self, delete: &UserDelete) -> Result<()> {
        let url = format!("{}/api/user/{}", self.base_url, delete.id);
        debug!(url = %url, "Deleting user");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::expect_ok(response).await
    }

    async fn signout(&self) -> Result<()> {
        let url = format!("{}/api/auth/signout", self.base_url);
        debug!(url = %url, "Signing out");

        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::expect_ok(response).await
    }
}
