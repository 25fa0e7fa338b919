//! Shared test doubles for unit and behaviour tests.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use tempfile::TempDir;

use crate::domain::{AuthToken, Session, UserProfile};
use crate::outbound::storage::FileSessionStorage;

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// File-backed session storage in a throwaway directory.
pub struct TempSessionStore {
    _dir: TempDir,
    path: Utf8PathBuf,
    storage: Arc<FileSessionStorage>,
}

impl TempSessionStore {
    pub fn new() -> Self {
        let dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temp dir: {error}"),
        };
        let path = match Utf8PathBuf::from_path_buf(dir.path().join("session")) {
            Ok(path) => path,
            Err(path) => panic!("temp dir is not UTF-8: {}", path.display()),
        };
        let storage = match FileSessionStorage::open(&path) {
            Ok(storage) => Arc::new(storage),
            Err(error) => panic!("failed to open session storage: {error}"),
        };
        Self {
            _dir: dir,
            path,
            storage,
        }
    }

    pub fn storage(&self) -> Arc<FileSessionStorage> {
        self.storage.clone()
    }

    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}

impl Default for TempSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A session for `first_name` carrying `token`.
pub fn session_for(token: &str, first_name: &str) -> Session {
    let user: UserProfile = match serde_json::from_value(serde_json::json!({
        "first_name": first_name,
        "last_name": "Traveller",
        "email": format!("{}@example.com", first_name.to_lowercase()),
    })) {
        Ok(user) => user,
        Err(error) => panic!("invalid profile fixture: {error}"),
    };
    match AuthToken::new(token) {
        Ok(token) => Session::new(token, user),
        Err(error) => panic!("invalid token fixture: {error}"),
    }
}
