//! Key/value persistence substrate.
//!
//! # Responsibility
//! - Define the minimal string key/value contract the record store needs.
//! - Keep SQL details behind that contract.
//!
//! # Invariants
//! - `set` fully overwrites any previous value under the same key.
//! - `remove` on an absent key succeeds without effect.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_kv;

pub use sqlite_kv::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure of the underlying key/value substrate.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Substrate-specific failure that has no structured form.
    Backend(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "key/value backend failure: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key/value store shared across sequential sessions.
pub trait KeyValueStore {
    /// Reads the value under `key`, `None` when absent.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Overwrites the value under `key`.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    /// Deletes `key` if present.
    fn remove(&self, key: &str) -> KvResult<()>;
}
