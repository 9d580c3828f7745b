//! Department repository contract and SQLite implementation.
//!
//! # Invariants
//! - A NULL `LOCATION` reads back as [`UNKNOWN_LOCATION`].
//! - `save` is a single native upsert keyed by `ID`.

use crate::model::department::{Department, DepartmentId, UNKNOWN_LOCATION};
use crate::repo::{column, ensure_table_shape, id_column, id_to_db, lookup_key, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

const TABLE: &str = "DEPARTMENT";

const REQUIRED_COLUMNS: &[&str] = &["ID", "NAME", "LOCATION"];

const DEPARTMENT_SELECT_SQL: &str = "SELECT ID, NAME, LOCATION FROM DEPARTMENT";

/// Repository interface for department records.
pub trait DepartmentRepository {
    fn get_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn get_all(&self) -> RepoResult<Vec<Department>>;
    /// Inserts or updates by id and returns the given record.
    fn save(&self, department: &Department) -> RepoResult<Department>;
    /// Deletes by id. Missing rows are ignored.
    fn delete(&self, department: &Department) -> RepoResult<()>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Constructs a repository after checking the `DEPARTMENT` column layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_shape(conn, TABLE, REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    pub(crate) fn from_verified(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn get_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let Some(key) = lookup_key(id) else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE ID = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY ID ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }
        Ok(departments)
    }

    fn save(&self, department: &Department) -> RepoResult<Department> {
        department.validate()?;
        let id = id_to_db("department.id", department.id)?;

        self.conn.execute(
            "INSERT INTO DEPARTMENT (ID, NAME, LOCATION)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (ID) DO UPDATE SET
                NAME = excluded.NAME,
                LOCATION = excluded.LOCATION;",
            params![id, department.name.as_str(), department.location.as_str()],
        )?;

        debug!("event=department_save module=repo status=ok id={id}");
        Ok(department.clone())
    }

    fn delete(&self, department: &Department) -> RepoResult<()> {
        let Some(key) = lookup_key(department.id) else {
            return Ok(());
        };

        let removed = self
            .conn
            .execute("DELETE FROM DEPARTMENT WHERE ID = ?1;", [key])?;

        debug!("event=department_delete module=repo status=ok id={key} removed={removed}");
        Ok(())
    }
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    let location: Option<String> = column(row, TABLE, "LOCATION")?;
    Ok(Department {
        id: id_column(row, TABLE, "ID")?,
        name: column(row, TABLE, "NAME")?,
        location: location.unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
    })
}
