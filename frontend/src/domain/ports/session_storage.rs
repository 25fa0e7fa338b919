//! Driven port for browser-style persistent key-value storage.
//!
//! The session is persisted as two string entries (`authToken`, `userData`).
//! The port is deliberately synchronous: storage reads happen on page load
//! and around form submissions, never across an await point.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by storage adapters.
    pub enum StorageError {
        /// The backing medium could not be read or written.
        Io { message: String } =>
            "session storage i/o failed: {message}",
        /// Stored bytes could not be interpreted.
        Corrupt { message: String } =>
            "session storage is corrupt: {message}",
    }
}

/// Persistent string storage keyed by name.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Read an entry, returning `None` when it is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite an entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove an entry. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage used by tests and by pages that opt out of
/// persistence.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemorySessionStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage with initial entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Snapshot of every stored entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn in_memory_storage_round_trips_and_removes() {
        let storage = InMemorySessionStorage::with_entries([("authToken", "t0")]);
        assert_eq!(storage.get("authToken").expect("get"), Some("t0".to_owned()));

        storage.set("authToken", "t1").expect("set");
        storage.remove("userData").expect("removing an absent key");
        assert_eq!(storage.get("authToken").expect("get"), Some("t1".to_owned()));

        storage.remove("authToken").expect("remove");
        assert!(storage.snapshot().is_empty());
    }
}
