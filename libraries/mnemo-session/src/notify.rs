//! Out-of-band credential rotation notifications.
//!
//! When a user's open-API token changes, an external service is told about
//! it. These calls are best-effort broadcasts by contract: the work runs on
//! a detached task, the result is discarded, and a failure never reaches
//! the operation that triggered it.

use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Sink for credential-change announcements. Implementations must return
/// without blocking on the delivery.
pub trait CredentialNotifier: Send + Sync {
    /// The open-API token changed from `old_open_id` to `new_open_id`.
    fn token_rotated(&self, old_open_id: Option<String>, new_open_id: String);

    /// The password changed; `open_id` is the token current at that moment.
    fn password_changed(&self, open_id: String, password: String);
}

/// Notifier that POSTs to a fixed external endpoint from detached tasks.
///
/// Must be used from within a tokio runtime.
pub struct HttpCredentialNotifier {
    http: Client,
    endpoint: String,
}

impl HttpCredentialNotifier {
    /// Create a notifier for the given endpoint base URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }
}

impl CredentialNotifier for HttpCredentialNotifier {
    fn token_rotated(&self, old_open_id: Option<String>, new_open_id: String) {
        let http = self.http.clone();
        let url = format!("{}/renewopenapi", self.endpoint);
        tokio::spawn(async move {
            let body = json!({
                "oldOpenApi": old_open_id,
                "newOpenApi": new_open_id,
            });
            if let Err(err) = http.post(&url).json(&body).send().await {
                debug!(url = %url, error = %err, "Token rotation notification failed");
            }
        });
    }

    fn password_changed(&self, open_id: String, password: String) {
        let http = self.http.clone();
        let url = format!("{}/renewpassword", self.endpoint);
        tokio::spawn(async move {
            let body = json!({
                "openApi": open_id,
                "password": password,
            });
            if let Err(err) = http.post(&url).json(&body).send().await {
                debug!(url = %url, error = %err, "Password change notification failed");
            }
        });
    }
}

/// Notifier that drops every announcement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CredentialNotifier for NoopNotifier {
    fn token_rotated(&self, _old_open_id: Option<String>, _new_open_id: String) {}

    fn password_changed(&self, _open_id: String, _password: String) {}
}
