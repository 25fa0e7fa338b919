//! File-backed session storage.
//!
//! All entries live in one JSON object file inside a capability-scoped
//! directory. Every write replaces the file through a temporary file and a
//! rename, so a crash never leaves a half-written session behind.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{SessionStorage, StorageError};

/// Name of the file holding every entry.
pub const SESSION_FILE_NAME: &str = "session.json";

type Entries = BTreeMap<String, String>;

/// [`SessionStorage`] persisting entries to `session.json`.
pub struct FileSessionStorage {
    dir: Dir,
    // Serialises read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Open (creating when needed) the storage directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(path: &Utf8Path) -> Result<Self, StorageError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| StorageError::io(format!("create {path}: {err}")))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| StorageError::io(format!("open {path}: {err}")))?;
        Ok(Self::from_dir(dir))
    }

    /// Wrap an already opened directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let raw = match self.dir.read_to_string(SESSION_FILE_NAME) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(StorageError::io(format!("read {SESSION_FILE_NAME}: {err}"))),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw)
            .map_err(|err| StorageError::corrupt(format!("{SESSION_FILE_NAME}: {err}")))
    }

    fn modify(&self, change: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = match self.load() {
            Ok(entries) => entries,
            // A corrupt file is replaced rather than blocking every future login.
            Err(StorageError::Corrupt { message }) => {
                tracing::warn!(%message, "discarding corrupt session file");
                Entries::new()
            }
            Err(err) => return Err(err),
        };
        change(&mut entries);
        let contents = serde_json::to_string_pretty(&entries)
            .map_err(|err| StorageError::corrupt(err.to_string()))?;
        self.write_atomic(&contents)?;
        debug!(entries = entries.len(), "session file written");
        Ok(())
    }

    fn write_atomic(&self, contents: &str) -> Result<(), StorageError> {
        let tmp_name = format!(".{SESSION_FILE_NAME}.tmp.{}", Uuid::new_v4());
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);

        let written = self
            .dir
            .open_with(&tmp_name, &options)
            .and_then(|mut file| {
                file.write_all(contents.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| self.dir.rename(&tmp_name, &self.dir, SESSION_FILE_NAME));

        if let Err(err) = written {
            if let Err(cleanup) = self.dir.remove_file(&tmp_name) {
                debug!(error = %cleanup, "temporary session file not removed");
            }
            return Err(StorageError::io(format!("write {SESSION_FILE_NAME}: {err}")));
        }
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
