//! Repository wiring over a single provider-supplied connection.
//!
//! # Responsibility
//! - Obtain exactly one connection from a [`ConnectionProvider`].
//! - Verify the schema contract once, then hand out repositories that borrow
//!   the shared handle.
//!
//! # Invariants
//! - Connection failures are returned unchanged; no retry, no pooling.
//! - Repositories never outlive the factory that owns the connection.

use crate::db::ConnectionProvider;
use crate::repo::department_repo::SqliteDepartmentRepository;
use crate::repo::employee_repo::SqliteEmployeeRepository;
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::Connection;

/// Owns one connection and builds repositories bound to it.
pub struct RepositoryFactory {
    conn: Connection,
}

impl RepositoryFactory {
    /// Opens a connection through `provider` and checks both tables.
    ///
    /// # Errors
    /// - `RepoError::Db` when the provider cannot connect.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   contract is not met.
    pub fn connect<P: ConnectionProvider + ?Sized>(provider: &P) -> RepoResult<Self> {
        let conn = provider.create_connection().map_err(|err| {
            error!(
                "event=factory_connect module=repo status=error error_code=connect_failed error={err}"
            );
            err
        })?;
        let factory = Self::from_connection(conn)?;
        info!("event=factory_connect module=repo status=ok");
        Ok(factory)
    }

    /// Wraps an already-open connection after checking both tables.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        SqliteEmployeeRepository::try_new(&conn)?;
        SqliteDepartmentRepository::try_new(&conn)?;
        Ok(Self { conn })
    }

    pub fn employees(&self) -> SqliteEmployeeRepository<'_> {
        SqliteEmployeeRepository::from_verified(&self.conn)
    }

    pub fn departments(&self) -> SqliteDepartmentRepository<'_> {
        SqliteDepartmentRepository::from_verified(&self.conn)
    }
}
