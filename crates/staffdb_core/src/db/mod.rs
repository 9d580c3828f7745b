//! SQLite connection provisioning for staffdb.
//!
//! # Responsibility
//! - Open file or in-memory stores and create `DEPARTMENT`/`EMPLOYEE` when
//!   they are missing.
//! - Define the connection-provider seam consumed by the repository factory.
//!
//! # Invariants
//! - Bootstrap only issues `CREATE ... IF NOT EXISTS`; reopening a populated
//!   store never touches its rows.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod provider;

pub use open::{open_db, open_db_in_memory};
pub use provider::{ConnectionProvider, SqliteConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

/// Failure talking to the backing store.
#[derive(Debug)]
pub enum DbError {
    /// The store at `target` could not be opened.
    Unavailable {
        target: String,
        source: rusqlite::Error,
    },
    /// Connection pragmas or table creation failed on a fresh handle.
    Bootstrap(rusqlite::Error),
    /// A statement failed on an open connection.
    Statement(rusqlite::Error),
}

impl DbError {
    /// Underlying SQLite error, whichever stage produced it.
    pub fn sqlite(&self) -> &rusqlite::Error {
        match self {
            Self::Unavailable { source, .. } => source,
            Self::Bootstrap(err) | Self::Statement(err) => err,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { target, source } => {
                write!(f, "cannot open store `{target}`: {source}")
            }
            Self::Bootstrap(err) => write!(f, "store bootstrap failed: {err}"),
            Self::Statement(err) => write!(f, "statement failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.sqlite())
    }
}
