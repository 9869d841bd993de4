//! Session state and persistence
//!
//! One authenticated session per app directory, stored as `session.json`
//! so it survives restarts. Only the token is required after a restore;
//! the user identity may be missing and callers must cope with that.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::result::Result;
use crate::domain::User;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token sent on every authenticated request
    pub token: String,
    /// Identity the token belongs to, when known. Absent after restoring
    /// a session file written before the identity was stored.
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user: Some(user),
        }
    }

    /// Session with a token but no identity attached
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }
}

/// File-backed session persistence
///
/// Reads and writes `session.json` under the app directory. Loading never
/// fails the startup path: a missing or unreadable file is simply a
/// logged-out state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            path: app_dir.join("session.json"),
        }
    }

    /// Load the persisted session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt file means logged out, not a startup failure
                warn!("ignoring unreadable session file: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist the session, creating the app directory if needed
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Delete the persisted session. Succeeds when none exists.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared handle to the in-memory session
///
/// The HTTP adapter reads the token on every request; login and logout
/// are the only writers. Clones share the same underlying slot.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SharedSession {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Replace the current session
    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap() = Some(session);
    }

    /// Drop the current session
    pub fn clear(&self) {
        *self.inner.write().unwrap() = None;
    }

    pub fn get(&self) -> Option<Session> {
        self.inner.read().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().unwrap().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .and_then(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }
}
