//! Mnemo Session
//!
//! Client-side user session state for Mnemo: reconciles the remote user
//! record, locally persisted preferences, and the in-memory store into one
//! merged model, and coordinates sign-in, sign-out, profile mutation, and
//! per-user setting storage.
//!
//! # Features
//!
//! - **Setting merge**: server key/value entries, client-local overrides,
//!   and fixed defaults combine into one fully populated settings object
//! - **Session resolution**: visitor mode and the effective user id derived
//!   from store state and the current navigation path
//! - **Mutation coordination**: every write re-runs the merge so the store
//!   only ever holds normalized records
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mnemo_session::{
//!     HttpUserApi, JsonFilePrefs, NavigationContext, NoopNotifier,
//!     SessionStore, UserSession,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = UserSession::new(
//!         Arc::new(HttpUserApi::new("https://memo.example.com")?),
//!         Arc::new(JsonFilePrefs::new("prefs.json")),
//!         Arc::new(NoopNotifier),
//!         SessionStore::new(),
//!         NavigationContext::new(),
//!     );
//!
//!     session.initialize().await?;
//!     if let Some(user) = session.store().current_user().await {
//!         println!("Signed in as {}", user.username);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod error;
mod http;
mod merge;
mod navigation;
mod notify;
mod prefs;
mod session;
mod store;

// Re-export main types
pub use api::UserApi;
pub use error::{Result, SessionError};
pub use http::HttpUserApi;
pub use merge::normalize;
pub use navigation::{user_id_from_path, NavigationContext};
pub use notify::{CredentialNotifier, HttpCredentialNotifier, NoopNotifier};
pub use prefs::{JsonFilePrefs, MemoryPrefs, PreferenceStore};
pub use session::UserSession;
pub use store::{GlobalState, SessionStore, StoreAction, StoreState, SystemStatus, UserState};
