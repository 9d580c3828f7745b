//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts over the `EMPLOYEE` and `DEPARTMENT` tables.
//! - Isolate SQL text and row mapping from callers.
//! - Translate between the in-memory model and the legacy storage shape.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation.
//! - Not-found is `Ok(None)` / an empty `Vec`, never an error.
//! - Row shape problems surface as `RepoError::InvalidData`, distinct from
//!   statement failures (`RepoError::Db`).
//! - Statements and cursors are dropped before each call returns.

use crate::db::DbError;
use crate::model::validation::EntityValidationError;
use rusqlite::types::FromSql;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod employee_repo;
pub mod factory;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence, mapping and schema-contract failures.
#[derive(Debug)]
pub enum RepoError {
    /// Record rejected before reaching storage.
    Validation(EntityValidationError),
    /// Statement execution or connectivity failure.
    Db(DbError),
    /// Stored row cannot be converted into a domain record.
    InvalidData(String),
    /// Connection does not expose a required table.
    MissingRequiredTable(&'static str),
    /// Required table exists but lacks a column.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "repository requires column `{column}` in table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<EntityValidationError> for RepoError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Statement(value))
    }
}

/// Reads one column, reporting type/NULL mismatches as mapping failures.
pub(crate) fn column<T: FromSql>(row: &Row<'_>, table: &str, name: &str) -> RepoResult<T> {
    row.get::<_, T>(name).map_err(|err| match err {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            RepoError::InvalidData(format!("{table}.{name}: {err}"))
        }
        other => other.into(),
    })
}

/// Reads a primary key column. Negative and zero ids are mapping failures.
pub(crate) fn id_column(row: &Row<'_>, table: &str, name: &str) -> RepoResult<u64> {
    let raw: i64 = column(row, table, name)?;
    match u64::try_from(raw) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RepoError::InvalidData(format!(
            "invalid id `{raw}` in {table}.{name}"
        ))),
    }
}

/// Reads a nullable reference column.
///
/// Legacy rows use 0 for "no reference", so NULL and 0 both map to `None`.
pub(crate) fn reference_column(
    row: &Row<'_>,
    table: &str,
    name: &str,
) -> RepoResult<Option<u64>> {
    match column::<Option<i64>>(row, table, name)? {
        None | Some(0) => Ok(None),
        Some(raw) => u64::try_from(raw).map(Some).map_err(|_| {
            RepoError::InvalidData(format!("invalid reference `{raw}` in {table}.{name}"))
        }),
    }
}

/// Converts a validated id into its storage representation.
pub(crate) fn id_to_db(field: &'static str, id: u64) -> RepoResult<i64> {
    i64::try_from(id).map_err(|_| {
        RepoError::Validation(EntityValidationError::IdOutOfRange { field, value: id })
    })
}

/// Storage key for lookups; ids that cannot be stored cannot match any row.
pub(crate) fn lookup_key(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Verifies `table` exists with every column in `columns`.
pub(crate) fn ensure_table_shape(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let present = table_columns(conn, table)?;
    for &column in columns {
        if !present
            .iter()
            .any(|current| current.eq_ignore_ascii_case(column))
        {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1 COLLATE NOCASE
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
