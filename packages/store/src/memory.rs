use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::session::{SessionError, SessionStore};

/// In-memory SessionStore for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, ACCESS_TOKEN_KEY};

    #[test]
    fn test_item_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get_item("missing").unwrap().is_none());

        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));

        store.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_session_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.read().unwrap().is_none());

        let session = Session {
            access_token: "abc".to_string(),
            user: crate::session::test_user(),
        };
        store.save(&session).unwrap();
        assert_eq!(store.read().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(store.get_item(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert!(store.read().unwrap().is_none());
    }
}
