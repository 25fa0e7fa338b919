//! Storage outbound adapters.

mod file_storage;

pub use file_storage::{FileSessionStorage, SESSION_FILE_NAME};
