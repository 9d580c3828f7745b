//! Connection provider seam.
//!
//! The repository factory never opens SQLite itself; it asks a provider for
//! a ready-to-use handle. Pooling, retries and credentials belong to the
//! provider, not to the repositories.

use super::open::{open_db, open_db_in_memory};
use super::DbResult;
use rusqlite::Connection;
use std::path::PathBuf;

/// Yields live, bootstrapped connections to the backing store.
pub trait ConnectionProvider {
    /// Opens one connection or fails with a connectivity error.
    fn create_connection(&self) -> DbResult<Connection>;
}

/// Default provider backed by [`open_db`] / [`open_db_in_memory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteConnectionProvider {
    /// Database file at the given path.
    File(PathBuf),
    /// Fresh private in-memory database per connection.
    InMemory,
}

impl SqliteConnectionProvider {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn in_memory() -> Self {
        Self::InMemory
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn create_connection(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => open_db(path),
            Self::InMemory => open_db_in_memory(),
        }
    }
}
