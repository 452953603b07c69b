//! Record Module
//!
//! The student record and the sub-entities it owns.
//!
//! ## Responsibilities
//! - Hold one student's identity, marks and fee ledger
//! - Refuse invalid values at construction time
//! - Keep fee and mark invariants on every mutation
//!
//! ## Ownership
//! ```text
//! Student ──owns──► Marks  (subject → score)
//!         └─owns──► Fees   (total, paid, payment history)
//! ```
//!
//! Every type here is built through a constructor that returns either a valid
//! value or [`RegistrarError::Validation`](crate::RegistrarError::Validation).
//! Fields are private, so a record held in memory is always valid.

mod fees;
mod marks;
mod student;

pub use fees::{Fees, Payment};
pub use marks::{Marks, MAX_SCORE, MIN_SCORE};
pub use student::{Student, MAX_YEAR, MIN_YEAR};

use crate::error::{RegistrarError, Result};

/// Key of a student within the store (positive)
pub type StudentId = u32;

/// Trim `value` and reject it if nothing is left
fn non_empty(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrarError::invalid(format!("{what} cannot be empty.")));
    }
    Ok(trimmed.to_string())
}

/// Reject NaN and infinities before any range check sees them
fn finite(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(RegistrarError::invalid(format!(
            "{what} must be a finite number. Got: {value}."
        )));
    }
    Ok(value)
}
