//! Student record

use super::{non_empty, Fees, Marks, StudentId};
use crate::error::{RegistrarError, Result};

/// First year of study
pub const MIN_YEAR: u8 = 1;

/// Last year of study
pub const MAX_YEAR: u8 = 5;

/// A student with personal details, marks and fees
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: StudentId,
    name: String,
    branch: String,
    year: u8,
    marks: Marks,
    fees: Fees,
}

impl Student {
    /// New student with no marks and an empty fee ledger
    pub fn new(id: StudentId, name: &str, branch: &str, year: u8) -> Result<Self> {
        Self::restore(id, name, branch, year, Marks::new(), Fees::new())
    }

    /// Reassemble a student from already-built sub-entities
    pub fn restore(
        id: StudentId,
        name: &str,
        branch: &str,
        year: u8,
        marks: Marks,
        fees: Fees,
    ) -> Result<Self> {
        if id == 0 {
            return Err(RegistrarError::invalid("Student id must be positive."));
        }
        let name = non_empty(name, "Student name")?;
        let branch = non_empty(branch, "Student branch")?;
        check_year(year)?;

        Ok(Self {
            id,
            name,
            branch,
            year,
            marks,
            fees,
        })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn year(&self) -> u8 {
        self.year
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut Marks {
        &mut self.marks
    }

    pub fn fees(&self) -> &Fees {
        &self.fees
    }

    pub fn fees_mut(&mut self) -> &mut Fees {
        &mut self.fees
    }

    /// Re-check every invariant, including the owned sub-entities
    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(RegistrarError::invalid("Student id must be positive."));
        }
        non_empty(&self.name, "Student name")?;
        non_empty(&self.branch, "Student branch")?;
        check_year(self.year)?;
        self.marks.validate()?;
        self.fees.validate()
    }
}

fn check_year(year: u8) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(RegistrarError::invalid(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}."
        )));
    }
    Ok(())
}
