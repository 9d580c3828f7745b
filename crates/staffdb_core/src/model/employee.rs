//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record and its name/position parts.
//! - Validate records before persistence and after deserialization.
//!
//! # Invariants
//! - `id` is non-zero and stable for the record lifetime.
//! - `manager_id`/`department_id` use `None` for absence, never `Some(0)`.
//! - `salary` is an exact, non-negative decimal.

use crate::model::department::DepartmentId;
use crate::model::validation::{check_id, check_reference, EntityValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-assigned employee identifier.
pub type EmployeeId = u64;

/// Closed set of job positions, persisted by upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    President,
    Manager,
    Analyst,
    Clerk,
    Salesman,
}

impl Position {
    pub const ALL: [Self; 5] = [
        Self::President,
        Self::Manager,
        Self::Analyst,
        Self::Clerk,
        Self::Salesman,
    ];

    /// Storage name of this position.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::President => "PRESIDENT",
            Self::Manager => "MANAGER",
            Self::Analyst => "ANALYST",
            Self::Clerk => "CLERK",
            Self::Salesman => "SALESMAN",
        }
    }

    /// Parses an exact storage name. Matching is case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == value)
    }
}

/// Person name split the way the `EMPLOYEE` table stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullName {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

impl FullName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: None,
        }
    }

    pub fn with_middle(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }
}

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeWire")]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: FullName,
    pub position: Position,
    /// Hire date, no time component.
    pub hired: NaiveDate,
    /// Serialized as a decimal string to stay exact.
    pub salary: Decimal,
    pub manager_id: Option<EmployeeId>,
    pub department_id: Option<DepartmentId>,
}

impl Employee {
    /// Creates a validated employee with no manager and no department.
    ///
    /// # Errors
    /// - `ZeroId` / `IdOutOfRange` for an unusable `id`.
    /// - `NegativeSalary` when `salary < 0`.
    pub fn new(
        id: EmployeeId,
        full_name: FullName,
        position: Position,
        hired: NaiveDate,
        salary: Decimal,
    ) -> Result<Self, EntityValidationError> {
        let employee = Self {
            id,
            full_name,
            position,
            hired,
            salary,
            manager_id: None,
            department_id: None,
        };
        employee.validate()?;
        Ok(employee)
    }

    pub fn with_manager(mut self, manager_id: EmployeeId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Checks id, reference and salary rules.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        check_id("employee", "employee.id", self.id)?;
        check_reference("employee.manager_id", self.manager_id)?;
        check_reference("employee.department_id", self.department_id)?;
        if self.salary < Decimal::ZERO {
            return Err(EntityValidationError::NegativeSalary(self.salary));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct EmployeeWire {
    id: EmployeeId,
    full_name: FullName,
    position: Position,
    hired: NaiveDate,
    salary: Decimal,
    manager_id: Option<EmployeeId>,
    department_id: Option<DepartmentId>,
}

impl TryFrom<EmployeeWire> for Employee {
    type Error = EntityValidationError;

    fn try_from(wire: EmployeeWire) -> Result<Self, Self::Error> {
        let employee = Self {
            id: wire.id,
            full_name: wire.full_name,
            position: wire.position,
            hired: wire.hired,
            salary: wire.salary,
            manager_id: wire.manager_id,
            department_id: wire.department_id,
        };
        employee.validate()?;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn position_parse_round_trips_every_variant() {
        for position in Position::ALL {
            assert_eq!(Position::parse(position.as_str()), Some(position));
        }
    }

    #[test]
    fn position_parse_is_case_sensitive() {
        assert_eq!(Position::parse("manager"), None);
        assert_eq!(Position::parse("JANITOR"), None);
    }
}
