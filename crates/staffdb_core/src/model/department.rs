//! Department domain model.

use crate::model::validation::{check_id, EntityValidationError};
use serde::{Deserialize, Serialize};

/// Caller-assigned department identifier.
pub type DepartmentId = u64;

/// Location reported for departments stored without one.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Canonical department record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepartmentWire")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub location: String,
}

impl Department {
    /// Creates a validated department.
    pub fn new(
        id: DepartmentId,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, EntityValidationError> {
        let department = Self {
            id,
            name: name.into(),
            location: location.into(),
        };
        department.validate()?;
        Ok(department)
    }

    pub fn validate(&self) -> Result<(), EntityValidationError> {
        check_id("department", "department.id", self.id)
    }
}

#[derive(Deserialize)]
struct DepartmentWire {
    id: DepartmentId,
    name: String,
    location: String,
}

impl TryFrom<DepartmentWire> for Department {
    type Error = EntityValidationError;

    fn try_from(wire: DepartmentWire) -> Result<Self, Self::Error> {
        let department = Self {
            id: wire.id,
            name: wire.name,
            location: wire.location,
        };
        department.validate()?;
        Ok(department)
    }
}
