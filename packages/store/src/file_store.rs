//! # Filesystem-backed session store
//!
//! [`FileStore`] is a [`SessionStore`] implementation that keeps each session
//! record in its own file. It is used by native builds to retain the session
//! across restarts, the way `localStorage` does in the browser.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── access_token       # bearer token, plain text
//! └── user               # JSON-encoded user
//! ```
//!
//! ## Platform data directories
//!
//! [`FileStore::in_data_dir`] resolves the base through [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/taskdeck/` |
//! | Linux | `~/.local/share/taskdeck/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\taskdeck\` |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::session::{SessionError, SessionStore};

const APP_DIR: &str = "taskdeck";

/// Filesystem-backed SessionStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store under the platform data directory, or `./taskdeck` when there is none.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl SessionStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // Non-UTF-8 bytes mean the record was damaged on disk.
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(SessionError::Corrupt(e.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.item_path(key), value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        match std::fs::remove_file(self.item_path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionContext, SessionStatus, USER_KEY};

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session"));
        assert!(store.read().unwrap().is_none());

        let session = Session {
            access_token: "token".to_string(),
            user: crate::session::test_user(),
        };
        store.save(&session).unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.path().join("session"));
        assert_eq!(reopened.read().unwrap(), Some(session));

        reopened.clear().unwrap();
        assert!(store.read().unwrap().is_none());
        // Clearing twice is fine.
        reopened.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_healed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.set_item("access_token", "token").unwrap();
        std::fs::write(dir.path().join(USER_KEY), [0xff, 0xfe, 0x00]).unwrap();

        let ctx = SessionContext::new(store.clone());
        assert_eq!(ctx.init(), SessionStatus::Corrupt);
        assert!(!dir.path().join(USER_KEY).exists());
        assert!(store.read().unwrap().is_none());
    }
}
