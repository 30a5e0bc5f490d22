//! Session token persistence.
//!
//! The HTTP client and the auth context never read storage directly; both
//! receive a [`TokenProvider`] at construction time.

use super::Result;
use crate::error::StorageError;
use keyring::Entry;
use std::sync::RwLock;

const KEYRING_SERVICE: &str = "medidir";

/// Source and sink of the persisted bearer token.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Result<Option<String>>;
    fn store(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Token stored in the OS keychain, one entry per profile.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    profile_name: String,
}

impl KeyringTokenStore {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
        }
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE, &format!("token-{}", self.profile_name))
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }
}

impl TokenProvider for KeyringTokenStore {
    fn token(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(v) if !v.is_empty() => Ok(Some(v)),
            Ok(_) => Ok(None),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(_) => Ok(()),
            // Nothing stored is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }
}

/// Process-local token, used for tests and `--no-keyring` sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenProvider for MemoryTokenStore {
    fn token(&self) -> Result<Option<String>> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}
