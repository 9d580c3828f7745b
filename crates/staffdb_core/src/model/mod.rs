//! Domain model for the staff directory.
//!
//! # Responsibility
//! - Define the employee and department records persisted by the repositories.
//! - Own the validation rules applied before every write.
//!
//! # Invariants
//! - Ids are caller supplied, non-zero and fit in a signed 64-bit column.
//! - Absent manager/department references are `None`, never `Some(0)`.

pub mod department;
pub mod employee;
pub mod validation;
