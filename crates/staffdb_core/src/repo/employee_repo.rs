//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD plus department/manager lookups over `EMPLOYEE`.
//! - Own the row mapping rules for the legacy column layout.
//!
//! # Invariants
//! - `save` is one atomic `INSERT .. ON CONFLICT(ID) DO UPDATE` statement.
//! - `get_by_department` orders by `(LASTNAME, FIRSTNAME)` with BINARY
//!   collation; middle name never participates, ties fall back to `ID`.
//! - `MANAGER`/`DEPARTMENT` values of NULL or 0 read back as `None`.

use crate::model::department::Department;
use crate::model::employee::{Employee, EmployeeId, FullName, Position};
use crate::repo::{
    column, ensure_table_shape, id_column, id_to_db, lookup_key, reference_column, RepoError,
    RepoResult,
};
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Params, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

const TABLE: &str = "EMPLOYEE";

const REQUIRED_COLUMNS: &[&str] = &[
    "ID",
    "FIRSTNAME",
    "LASTNAME",
    "MIDDLENAME",
    "POSITION",
    "HIREDATE",
    "SALARY",
    "MANAGER",
    "DEPARTMENT",
];

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    ID,
    FIRSTNAME,
    LASTNAME,
    MIDDLENAME,
    POSITION,
    HIREDATE,
    SALARY,
    MANAGER,
    DEPARTMENT
FROM EMPLOYEE";

/// Repository interface for employee records.
pub trait EmployeeRepository {
    /// Returns the employee with `id`, or `None` when no row matches.
    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Returns every employee.
    fn get_all(&self) -> RepoResult<Vec<Employee>>;
    /// Returns members of `department` sorted by last then first name.
    fn get_by_department(&self, department: &Department) -> RepoResult<Vec<Employee>>;
    /// Returns direct reports of `manager`.
    fn get_by_manager(&self, manager: &Employee) -> RepoResult<Vec<Employee>>;
    /// Inserts or updates by id and returns the given record.
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    /// Deletes by id. Missing rows are ignored.
    fn delete(&self, employee: &Employee) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository after checking the `EMPLOYEE` column layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_shape(conn, TABLE, REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    pub(crate) fn from_verified(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_employees<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let Some(key) = lookup_key(id) else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE ID = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY ID ASC;"), params![])
    }

    fn get_by_department(&self, department: &Department) -> RepoResult<Vec<Employee>> {
        let Some(key) = lookup_key(department.id) else {
            return Ok(Vec::new());
        };

        self.query_employees(
            &format!(
                "{EMPLOYEE_SELECT_SQL}
                 WHERE DEPARTMENT = ?1
                 ORDER BY LASTNAME COLLATE BINARY ASC, FIRSTNAME COLLATE BINARY ASC, ID ASC;"
            ),
            [key],
        )
    }

    fn get_by_manager(&self, manager: &Employee) -> RepoResult<Vec<Employee>> {
        let Some(key) = lookup_key(manager.id) else {
            return Ok(Vec::new());
        };

        self.query_employees(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE MANAGER = ?1 ORDER BY ID ASC;"),
            [key],
        )
    }

    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        employee.validate()?;

        let id = id_to_db("employee.id", employee.id)?;
        let manager = employee
            .manager_id
            .map(|value| id_to_db("employee.manager_id", value))
            .transpose()?;
        let department = employee
            .department_id
            .map(|value| id_to_db("employee.department_id", value))
            .transpose()?;

        self.conn.execute(
            "INSERT INTO EMPLOYEE (
                ID,
                FIRSTNAME,
                LASTNAME,
                MIDDLENAME,
                POSITION,
                HIREDATE,
                SALARY,
                MANAGER,
                DEPARTMENT
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (ID) DO UPDATE SET
                FIRSTNAME = excluded.FIRSTNAME,
                LASTNAME = excluded.LASTNAME,
                MIDDLENAME = excluded.MIDDLENAME,
                POSITION = excluded.POSITION,
                HIREDATE = excluded.HIREDATE,
                SALARY = excluded.SALARY,
                MANAGER = excluded.MANAGER,
                DEPARTMENT = excluded.DEPARTMENT;",
            params![
                id,
                employee.full_name.first_name.as_str(),
                employee.full_name.last_name.as_str(),
                employee.full_name.middle_name.as_deref(),
                employee.position.as_str(),
                employee.hired,
                employee.salary.to_string(),
                manager,
                department,
            ],
        )?;

        debug!("event=employee_save module=repo status=ok id={id}");
        Ok(employee.clone())
    }

    fn delete(&self, employee: &Employee) -> RepoResult<()> {
        let Some(key) = lookup_key(employee.id) else {
            return Ok(());
        };

        let removed = self
            .conn
            .execute("DELETE FROM EMPLOYEE WHERE ID = ?1;", [key])?;

        debug!("event=employee_delete module=repo status=ok id={key} removed={removed}");
        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let position_text: String = column(row, TABLE, "POSITION")?;
    let position = Position::parse(&position_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid position `{position_text}` in EMPLOYEE.POSITION"
        ))
    })?;

    Ok(Employee {
        id: id_column(row, TABLE, "ID")?,
        full_name: FullName {
            first_name: column(row, TABLE, "FIRSTNAME")?,
            last_name: column(row, TABLE, "LASTNAME")?,
            middle_name: column(row, TABLE, "MIDDLENAME")?,
        },
        position,
        hired: column(row, TABLE, "HIREDATE")?,
        salary: parse_salary(row)?,
        manager_id: reference_column(row, TABLE, "MANAGER")?,
        department_id: reference_column(row, TABLE, "DEPARTMENT")?,
    })
}

/// Accepts TEXT, INTEGER or REAL salary storage.
fn parse_salary(row: &Row<'_>) -> RepoResult<Decimal> {
    let parsed = match row.get_ref("SALARY")? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| Decimal::from_str(text.trim()).ok()),
        ValueRef::Integer(value) => Some(Decimal::from(value)),
        ValueRef::Real(value) => Decimal::try_from(value).ok(),
        ValueRef::Null | ValueRef::Blob(_) => None,
    };

    match parsed {
        Some(salary) if salary >= Decimal::ZERO => Ok(salary),
        _ => Err(RepoError::InvalidData(
            "unreadable or negative value in EMPLOYEE.SALARY".to_string(),
        )),
    }
}
