//! Token sources for secure calls.
//!
//! # Design
//! The client only ever reads a token: `TokenStore::get` is the whole
//! contract. Stores that can be written (`MemoryTokenStore`,
//! `FileTokenStore`) expose their own setters so the application that logs
//! the user in can persist the token where the client will find it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// Fallback token source consulted when no token is configured.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// A store that never holds a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTokenStore;

impl TokenStore for NoTokenStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are plain strings, so a poisoned lock is recovered rather
    /// than dropping the write.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// Token store persisted as a flat JSON object on disk.
///
/// A missing file is an empty store. `set` writes the whole object back.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileTokenStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| ApiError::Config(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ApiError::Config(format!("{}: {e}", path.display()))),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), value.into());
        let raw = serde_json::to_string_pretty(&*entries)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| ApiError::Config(format!("{}: {e}", self.path.display())))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// Resolve the `Authorization` header value for a secure call.
///
/// The configured token wins over the store. An empty scheme yields the bare
/// token. Empty tokens count as absent.
pub fn authorization_value(config: &ClientConfig, store: &dyn TokenStore) -> Option<String> {
    let token = config
        .token
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| store.get(&config.token_storage_key))
        .filter(|t| !t.is_empty())?;
    if config.send_token_as.is_empty() {
        Some(token)
    } else {
        Some(format!("{} {token}", config.send_token_as))
    }
}
