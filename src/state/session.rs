//! Session store holding at most one bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login and registration write the token, the dashboard reads it, and
//! logout or a server-side rejection clears it. Screens receive the store as
//! an injected `Arc<dyn SessionStore>` rather than reaching for a global.
//!
//! The file-backed store mirrors browser local storage: one JSON object of
//! named slots, with the token kept under [`TOKEN_SLOT`]. Unrelated slots in
//! the same file are left untouched.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::net::types::SessionToken;

pub const TOKEN_SLOT: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file {path} not writable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Get/set/clear access to the single token slot.
pub trait SessionStore: Send + Sync {
    /// The stored token, if any.
    fn get(&self) -> Option<SessionToken>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backing storage cannot be written.
    fn set(&self, token: SessionToken) -> Result<(), SessionError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionToken>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn with_token(token: SessionToken) -> Self {
        Self { slot: Mutex::new(Some(token)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<SessionToken> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, token: SessionToken) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE-BACKED
// =============================================================================

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all slots. A missing file is an empty map; an unreadable or
    /// corrupt one is logged and also treated as empty.
    fn load(&self) -> Map<String, Value> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return Map::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "session file is not a JSON object; ignoring");
                Map::new()
            }
        }
    }

    fn save(&self, slots: &Map<String, Value>) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let encoded = serde_json::to_string_pretty(slots)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, encoded).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<SessionToken> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.load().get(TOKEN_SLOT) {
            Some(Value::String(token)) if !token.is_empty() => Some(SessionToken::new(token.clone())),
            _ => None,
        }
    }

    fn set(&self, token: SessionToken) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.load();
        slots.insert(TOKEN_SLOT.to_owned(), Value::String(token.as_str().to_owned()));
        self.save(&slots)?;
        tracing::debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.load();
        if slots.remove(TOKEN_SLOT).is_none() {
            return Ok(());
        }
        self.save(&slots)?;
        tracing::debug!(path = %self.path.display(), "session token cleared");
        Ok(())
    }
}
