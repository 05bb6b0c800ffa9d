//! Session State and Persistence
//!
//! A session is the backend access token plus the minimal user profile,
//! persisted as a single JSON file in the platform data directory. The auth
//! client is the only writer; every other component reads through a
//! [`SessionHandle`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// File name for the persisted session, under the app data directory
const SESSION_FILE: &str = "session.json";

/// Directory name under the platform data dir
const APP_DIR: &str = "cardmate";

/// Minimal user profile returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub email: String,
}

/// An authenticated session: access token plus user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Disk-backed session storage.
///
/// Load and save failures degrade to "no session" rather than erroring:
/// a corrupt or missing file just means the user has to log in again.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default platform location
    /// (`<data_dir>/cardmate/session.json`)
    pub fn open_default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self {
            path: base.join(SESSION_FILE),
        }
    }

    /// Store at an explicit path (used by tests)
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted session, if any
    pub fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session file");
                None
            }
        }
    }

    /// Persist a session. Failures are logged, not surfaced; the in-memory
    /// session remains valid for the rest of the process either way.
    pub fn save(&self, session: &Session) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string(session)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(&self.path, raw)
        };
        if let Err(e) = write() {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to persist session");
        }
    }

    /// Remove the persisted session
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, "failed to remove session file");
            }
        }
    }
}

/// Shared read access to the current session.
///
/// Cloned handles observe the same state. Guards are never held across an
/// await point; readers take a snapshot and release the lock immediately.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    /// Snapshot of the current session
    pub fn snapshot(&self) -> Option<Session> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    /// Current access token, if logged in
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.access_token.clone()))
    }

    /// Whether a session is present
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Replace the in-memory session. Writes are confined to the auth client.
    pub(crate) fn replace(&self, session: Option<Session>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = session;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            access_token: "tok-123".to_string(),
            user: User {
                username: "jane".to_string(),
                email: "jane@acme.com".to_string(),
            },
        }
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at_path(dir.path().join("session.json"));

        assert!(store.load().is_none());
        store.save(&sample_session());
        assert_eq!(store.load(), Some(sample_session()));
    }

    #[test]
    fn test_store_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at_path(dir.path().join("session.json"));
        store.save(&sample_session());
        store.clear();
        assert!(store.load().is_none());
        // clearing twice is fine
        store.clear();
    }

    #[test]
    fn test_store_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = SessionStore::at_path(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_handle_shared_state() {
        let handle = SessionHandle::default();
        let clone = handle.clone();
        assert!(!clone.is_authenticated());

        handle.replace(Some(sample_session()));
        assert_eq!(clone.token(), Some("tok-123".to_string()));

        handle.replace(None);
        assert!(clone.snapshot().is_none());
    }
}
