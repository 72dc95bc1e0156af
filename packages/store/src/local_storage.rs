//! # `localStorage` session store for the browser
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the **web platform**.
//! It reads and writes `window.localStorage`, so a signed-in user stays signed
//! in across reloads of the same browser.
//!
//! The struct is zero-sized and looks up the storage object on every call;
//! `web_sys::Storage` is not `Send`, and the lookup is cheap. Every failure to
//! reach storage (no window, storage disabled by privacy settings) maps to
//! [`SessionError::Unavailable`].

use web_sys::Storage;

use crate::session::{SessionError, SessionStore};

/// `window.localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<Storage, SessionError> {
        let window = web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| SessionError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| SessionError::Unavailable("localStorage disabled".to_string()))
    }
}

impl SessionStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SessionError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| SessionError::Unavailable(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| SessionError::Unavailable(format!("{e:?}")))
    }
}
