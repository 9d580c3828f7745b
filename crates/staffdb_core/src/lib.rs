//! Employee and department data access over SQLite.
//!
//! Repositories map the fixed `EMPLOYEE`/`DEPARTMENT` tables to typed
//! records; the factory binds them to one provider-supplied connection.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{ConnectionProvider, DbError, DbResult, SqliteConnectionProvider};
pub use logging::{default_log_level, flush_logging, init_logging};
pub use model::department::{Department, DepartmentId, UNKNOWN_LOCATION};
pub use model::employee::{Employee, EmployeeId, FullName, Position};
pub use model::validation::EntityValidationError;
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::factory::RepositoryFactory;
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
