//! # Session persistence and the session context
//!
//! An authenticated session is an access token plus a denormalised [`User`].
//! It is persisted as two records under the literal keys [`ACCESS_TOKEN_KEY`]
//! and [`USER_KEY`], the latter holding the user as JSON.
//!
//! ## [`SessionStore`] trait
//!
//! Backends only implement three string key/value operations; the record
//! semantics (`read`, `save`, `clear`) are provided on top of them so every
//! backend detects corruption the same way.
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`crate::MemoryStore`] | tests, native fallback |
//! | [`crate::FileStore`] | native, one file per key |
//! | `LocalStorageStore` | browser, `window.localStorage` (`web` feature) |
//!
//! ## [`SessionContext`]
//!
//! The handle threaded through the HTTP client and services instead of ambient
//! storage lookups. [`SessionContext::init`] loads the persisted session once;
//! a record that cannot be decoded is cleared and reported as
//! [`SessionStatus::Corrupt`] so the UI can send the user back to login.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Storage key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the JSON-encoded user.
pub const USER_KEY: &str = "user";

/// The authenticated identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent key/value storage for the session records.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;

    /// Load the stored session. `Ok(None)` when nobody is signed in.
    fn read(&self) -> Result<Option<Session>, SessionError> {
        let Some(access_token) = self.get_item(ACCESS_TOKEN_KEY)? else {
            return Ok(None);
        };
        if access_token.trim().is_empty() {
            return Err(SessionError::Corrupt("empty access token".to_string()));
        }
        let Some(user_json) = self.get_item(USER_KEY)? else {
            return Err(SessionError::Corrupt("missing user record".to_string()));
        };
        let user: User = serde_json::from_str(&user_json)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;
        Ok(Some(Session { access_token, user }))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;
        self.set_item(ACCESS_TOKEN_KEY, &session.access_token)?;
        self.set_item(USER_KEY, &user_json)
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.remove_item(ACCESS_TOKEN_KEY)?;
        self.remove_item(USER_KEY)
    }
}

/// Outcome of loading the persisted session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStatus {
    Authenticated(User),
    Anonymous,
    /// Stored data was unreadable and has been cleared; re-authenticate.
    Corrupt,
}

/// Shared handle to the current session and its backing store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore + Send + Sync>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new(store: impl SessionStore + Send + Sync + 'static) -> Self {
        Self {
            store: Arc::new(store),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Load the persisted session into memory, healing corrupt records.
    pub fn init(&self) -> SessionStatus {
        match self.store.read() {
            Ok(Some(session)) => {
                let user = session.user.clone();
                self.set_current(Some(session));
                SessionStatus::Authenticated(user)
            }
            Ok(None) => {
                self.set_current(None);
                SessionStatus::Anonymous
            }
            Err(SessionError::Corrupt(reason)) => {
                tracing::warn!(%reason, "discarding corrupt stored session");
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "failed to clear corrupt session");
                }
                self.set_current(None);
                SessionStatus::Corrupt
            }
            Err(e) => {
                tracing::warn!(error = %e, "session storage unreadable");
                self.set_current(None);
                SessionStatus::Anonymous
            }
        }
    }

    /// Start a session after login or registration.
    ///
    /// A storage failure is logged and the session stays in memory only, so
    /// the user is signed in until the page is reloaded.
    pub fn begin(&self, session: Session) {
        if let Err(e) = self.store.save(&session) {
            tracing::warn!(error = %e, "session kept in memory only");
        }
        self.set_current(Some(session));
    }

    /// Drop the session from memory and storage.
    pub fn end(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        self.set_current(None);
    }

    pub fn token(&self) -> Option<String> {
        self.read_current(|s| s.map(|s| s.access_token.clone()))
    }

    pub fn user(&self) -> Option<User> {
        self.read_current(|s| s.map(|s| s.user.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_current(|s| s.is_some())
    }

    fn set_current(&self, session: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn read_current<T>(&self, f: impl FnOnce(Option<&Session>) -> T) -> T {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_ref())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }
}

#[cfg(test)]
pub(crate) fn test_user() -> User {
    use chrono::TimeZone;
    let at = chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    User {
        id: "u-1".to_string(),
        username: "alice".to_string(),
        created_at: at,
        updated_at: at,
    }
}
