//! Record Store
//!
//! The in-memory authority over every student record.
//!
//! ## Responsibilities
//! - Assign ids (`max + 1`, never reused within a session)
//! - Locate records for fee and mark mutations
//! - Stamp payments with the injected [`Clock`]
//!
//! The store never touches the disk. Saving after a successful mutation is
//! the caller's job (see [`Portal`](crate::Portal)).

use std::collections::BTreeMap;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{RegistrarError, Result};
use crate::record::{Student, StudentId};

/// In-memory mapping from student id to record
pub struct RecordStore {
    /// Records keyed by id; iteration order is ascending id
    records: BTreeMap<StudentId, Student>,

    /// Id handed to the next `create`. Only ever grows, so deleting the
    /// newest record does not free its id for reuse in this session.
    next_id: StudentId,

    /// Time source for payment timestamps
    clock: Box<dyn Clock>,
}

impl RecordStore {
    /// Empty store using the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Empty store using the given clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
            clock: Box::new(clock),
        }
    }

    /// Store seeded with loaded records
    ///
    /// Next id = max + 1, or 1 if there are no records.
    pub fn from_records(
        records: impl IntoIterator<Item = Student>,
        clock: impl Clock + 'static,
    ) -> Self {
        let records: BTreeMap<StudentId, Student> =
            records.into_iter().map(|s| (s.id(), s)).collect();
        let next_id = records
            .keys()
            .next_back()
            .map(|&id| id.saturating_add(1))
            .unwrap_or(1);

        Self {
            records,
            next_id,
            clock: Box::new(clock),
        }
    }

    // =========================================================================
    // Create / Read / Delete
    // =========================================================================

    /// Create a student with the next id.
    ///
    /// Nothing is inserted, and no id is consumed, if validation fails.
    pub fn create(&mut self, name: &str, branch: &str, year: u8) -> Result<&Student> {
        let id = self.next_id;
        let following = id
            .checked_add(1)
            .ok_or_else(|| RegistrarError::invalid("Student id space is exhausted."))?;

        let student = Student::new(id, name, branch, year)?;
        self.next_id = following;
        debug!(id, name = student.name(), "created student");

        Ok(&*self.records.entry(id).or_insert(student))
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.records.get(&id)
    }

    /// All students in ascending id order
    pub fn list(&self) -> Vec<&Student> {
        self.records.values().collect()
    }

    /// Remove a student and hand the record back
    pub fn delete(&mut self, id: StudentId) -> Result<Student> {
        let student = self
            .records
            .remove(&id)
            .ok_or(RegistrarError::NotFound(id))?;
        debug!(id, "deleted student");
        Ok(student)
    }

    // =========================================================================
    // Fees and Marks
    // =========================================================================

    pub fn set_total_fees(&mut self, id: StudentId, total: f64) -> Result<()> {
        self.student_mut(id)?.fees_mut().set_total(total)?;
        debug!(id, total, "set total fees");
        Ok(())
    }

    /// Record a payment stamped with the store's clock
    pub fn pay_fees(&mut self, id: StudentId, amount: f64) -> Result<()> {
        let at = self.clock.now();
        self.student_mut(id)?.fees_mut().pay(amount, at)?;
        debug!(id, amount, "recorded payment");
        Ok(())
    }

    pub fn set_mark(&mut self, id: StudentId, subject: &str, score: f64) -> Result<()> {
        self.student_mut(id)?.marks_mut().set_mark(subject, score)?;
        debug!(id, subject = subject.trim(), score, "set mark");
        Ok(())
    }

    /// Remove a mark; returns whether the subject had one
    pub fn remove_mark(&mut self, id: StudentId, subject: &str) -> Result<bool> {
        let removed = self.student_mut(id)?.marks_mut().remove_mark(subject);
        debug!(id, subject = subject.trim(), removed, "removed mark");
        Ok(removed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Borrow the underlying map (for persistence)
    pub fn records(&self) -> &BTreeMap<StudentId, Student> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next `create` will assign
    pub fn next_id(&self) -> StudentId {
        self.next_id
    }

    fn student_mut(&mut self, id: StudentId) -> Result<&mut Student> {
        self.records
            .get_mut(&id)
            .ok_or(RegistrarError::NotFound(id))
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
