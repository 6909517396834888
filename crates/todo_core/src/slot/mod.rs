//! Durable slot port and its backends.
//!
//! # Responsibility
//! - Define the key-value contract the store persists through.
//! - Keep backend details (SQLite, files, memory) out of store logic.
//!
//! # Invariants
//! - `write` replaces the whole value for a key in one call.
//! - `read` returns `Ok(None)` for a key that was never written.

mod file;
mod memory;
mod sqlite;

pub use file::FileSlot;
pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

use crate::db::DbError;
use std::path::PathBuf;

pub type SlotResult<T> = Result<T, SlotError>;

/// Transport-level failure of a slot backend.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("slot io failed at `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid slot key `{0}`")]
    InvalidKey(String),
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named single-blob storage location.
pub trait TodoSlot {
    fn read(&self, key: &str) -> SlotResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> SlotResult<()>;
}

impl<S: TodoSlot + ?Sized> TodoSlot for &S {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        (**self).write(key, value)
    }
}
