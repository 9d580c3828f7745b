//! Validation errors shared by employee and department records.

use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Largest id that can be stored in an SQLite `INTEGER` column.
pub const MAX_STORABLE_ID: u64 = i64::MAX as u64;

/// Reasons a record is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValidationError {
    /// Id 0 is reserved as the storage-level "absent" marker.
    ZeroId { entity: &'static str },
    /// A reference field was set to `Some(0)`; use `None` for absence.
    ZeroReference { field: &'static str },
    /// Id does not fit a signed 64-bit column.
    IdOutOfRange { field: &'static str, value: u64 },
    /// Salary below zero.
    NegativeSalary(Decimal),
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroId { entity } => write!(f, "{entity} id must be non-zero"),
            Self::ZeroReference { field } => {
                write!(f, "{field} must be None instead of Some(0)")
            }
            Self::IdOutOfRange { field, value } => {
                write!(f, "{field} ({value}) exceeds {MAX_STORABLE_ID}")
            }
            Self::NegativeSalary(value) => write!(f, "salary ({value}) must be >= 0"),
        }
    }
}

impl Error for EntityValidationError {}

pub(crate) fn check_id(
    entity: &'static str,
    field: &'static str,
    id: u64,
) -> Result<(), EntityValidationError> {
    if id == 0 {
        return Err(EntityValidationError::ZeroId { entity });
    }
    check_range(field, id)
}

pub(crate) fn check_reference(
    field: &'static str,
    id: Option<u64>,
) -> Result<(), EntityValidationError> {
    match id {
        Some(0) => Err(EntityValidationError::ZeroReference { field }),
        Some(value) => check_range(field, value),
        None => Ok(()),
    }
}

fn check_range(field: &'static str, value: u64) -> Result<(), EntityValidationError> {
    if value > MAX_STORABLE_ID {
        return Err(EntityValidationError::IdOutOfRange { field, value });
    }
    Ok(())
}
