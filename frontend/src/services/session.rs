//! Authenticated session state.
//!
//! The session is an explicit value handed to the API client rather than a
//! global. Clones share the same state, so a `401` seen by one request logs
//! out every holder of the context.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::models::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Option<String>,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Where a session survives between runs
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session persisted as a JSON file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let session = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session file {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Session kept only for the lifetime of the process
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Shared handle on the current session
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Start logged out
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Pick up a session saved by a previous run; an unreadable one is discarded
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let context = Self::new(store);
        match context.store.load() {
            Ok(Some(session)) => {
                log::debug!("Restored session for {}", session.user.username);
                *context.write() = Some(session);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring saved session: {:#}", e),
        }
        context
    }

    /// Mark the user logged in. The in-memory session is set even when
    /// persisting it fails.
    pub fn begin(&self, session: Session) -> Result<()> {
        log::info!("Session started for {}", session.user.username);
        let saved = self.store.save(&session);
        *self.write() = Some(session);
        saved
    }

    /// Log out locally, forgetting the token in memory and in the store
    pub fn end(&self) {
        let previous = self.write().take();
        if let Some(session) = previous {
            log::info!("Session ended for {}", session.user.username);
        }
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear saved session: {:#}", e);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
