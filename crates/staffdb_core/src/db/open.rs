//! Opening and bootstrapping SQLite handles.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`, a busy timeout, and both
//!   tables present.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const SCHEMA_SQL: &str = include_str!("schema.sql");
const IN_MEMORY_TARGET: &str = ":memory:";

/// Opens (creating if needed) the database file at `path`.
///
/// # Side effects
/// - Creates the file and the two tables when they do not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(&path.display().to_string(), || Connection::open(path))
}

/// Opens a private in-memory database with both tables created.
///
/// Every call yields an independent, empty database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(IN_MEMORY_TARGET, Connection::open_in_memory)
}

fn open_with<F>(target: &str, open: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    let mode = if target == IN_MEMORY_TARGET { "memory" } else { "file" };
    info!("event=db_open module=db status=start mode={mode}");

    let result = open()
        .map_err(|source| DbError::Unavailable {
            target: target.to_string(),
            source,
        })
        .and_then(|conn| bootstrap(&conn).map(|()| conn).map_err(DbError::Bootstrap));

    let elapsed_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={elapsed_ms}"),
        Err(err) => {
            let error_code = match err {
                DbError::Unavailable { .. } => "db_unavailable",
                _ => "db_bootstrap_failed",
            };
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={elapsed_ms} error_code={error_code} error={}",
                err.sqlite()
            );
        }
    }
    result
}

fn bootstrap(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(SCHEMA_SQL)
}
