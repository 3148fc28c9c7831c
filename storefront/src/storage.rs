//! Key/value persistence for credentials and the offline cart.
//!
//! [`Storage`] abstracts over where the strings live so the session layer
//! works the same against an in-memory map (tests, ephemeral CLIs) or a
//! JSON file on disk.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use payloads::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const CART_KEY: &str = "cart-storage";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Volatile storage. Every instance starts empty.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).remove(key);
    }
}

/// Storage persisted as a single JSON object on disk.
///
/// Writes are flushed on every mutation. I/O failures are logged and the
/// in-memory view stays authoritative for the rest of the process.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) {
        let serialized = match serde_json::to_string(entries) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("failed to serialize storage: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, serialized) {
            tracing::error!("failed to persist storage to {}: {e}", self.path.display());
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        self.flush(&entries);
    }
}

/// Bearer token accessors over any [`Storage`].
pub struct TokenStorage;

impl TokenStorage {
    pub fn get(storage: &dyn Storage) -> Option<String> {
        storage.get(TOKEN_KEY)
    }

    pub fn set(storage: &dyn Storage, token: &str) {
        storage.set(TOKEN_KEY, token);
    }

    pub fn remove(storage: &dyn Storage) {
        storage.remove(TOKEN_KEY);
    }
}

/// Cached user record accessors. A value that fails to decode is treated as
/// absent rather than surfaced as an error.
pub struct UserStorage;

impl UserStorage {
    pub fn get(storage: &dyn Storage) -> Option<User> {
        storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn set(storage: &dyn Storage, user: &User) {
        match serde_json::to_string(user) {
            Ok(serialized) => storage.set(USER_KEY, &serialized),
            Err(e) => tracing::error!("failed to serialize user: {e}"),
        }
    }

    pub fn remove(storage: &dyn Storage) {
        storage.remove(USER_KEY);
    }
}
