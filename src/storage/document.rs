//! On-disk document shapes
//!
//! Plain serde mirrors of the JSON written to the data file. They carry no
//! invariants of their own; converting into a [`Student`] re-validates
//! everything.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RegistrarError, Result};
use crate::record::{Fees, Marks, Payment, Student, StudentId};

/// One student as stored in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDocument {
    /// Informational copy of the map key; the key wins on load
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub branch: String,
    pub year: i64,
    #[serde(default)]
    pub marks: BTreeMap<String, f64>,
    #[serde(default)]
    pub fees: FeesDocument,
}

/// Fee ledger as stored in the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeesDocument {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub paid: f64,
    #[serde(default)]
    pub history: Vec<PaymentDocument>,
}

/// One payment as stored in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDocument {
    pub amount: f64,
    /// ISO-8601 timestamp
    pub ts: String,
}

impl From<&Student> for StudentDocument {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(i64::from(student.id())),
            name: student.name().to_string(),
            branch: student.branch().to_string(),
            year: i64::from(student.year()),
            marks: student
                .marks()
                .iter()
                .map(|(subject, score)| (subject.to_string(), score))
                .collect(),
            fees: FeesDocument {
                total: student.fees().total(),
                paid: student.fees().paid(),
                history: student
                    .fees()
                    .history()
                    .iter()
                    .map(|p| PaymentDocument {
                        amount: p.amount(),
                        ts: format_timestamp(p.at()),
                    })
                    .collect(),
            },
        }
    }
}

impl StudentDocument {
    /// Rebuild and validate the student stored under `id`
    pub fn into_student(self, id: StudentId) -> Result<Student> {
        let marks = Marks::from_scores(self.marks)?;

        let history = self
            .fees
            .history
            .into_iter()
            .map(|p| Payment::new(p.amount, parse_timestamp(&p.ts)?))
            .collect::<Result<Vec<_>>>()?;
        let fees = Fees::restore(self.fees.total, self.fees.paid, history)?;

        // Out-of-range years fail the year check below
        let year = u8::try_from(self.year).unwrap_or(0);
        Student::restore(id, &self.name, &self.branch, year, marks, fees)
    }
}

/// One student as written by the older list-shaped files:
/// `[{"id": 1, ..., "marks": null | [90.0, ...], "fees": null | 500.0}]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyStudentDocument {
    pub id: i64,
    pub name: String,
    pub branch: String,
    pub year: i64,
    /// Scores without subject names
    #[serde(default)]
    pub marks: Option<Vec<f64>>,
    /// Fees due, as a single amount
    #[serde(default)]
    pub fees: Option<f64>,
}

impl LegacyStudentDocument {
    /// Scores that have no subject to be filed under and are dropped
    pub fn unnamed_marks(&self) -> usize {
        self.marks.as_ref().map_or(0, Vec::len)
    }

    /// Rebuild and validate the student stored under `id`.
    ///
    /// The fee amount becomes the total due with nothing paid.
    pub fn into_student(self, id: StudentId) -> Result<Student> {
        let fees = match self.fees {
            Some(total) => Fees::with_amounts(total, 0.0)?,
            None => Fees::new(),
        };
        let year = u8::try_from(self.year).unwrap_or(0);
        Student::restore(id, &self.name, &self.branch, year, Marks::new(), fees)
    }
}

/// An element of a list-shaped document, in either record shape
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListedStudentDocument {
    Current(StudentDocument),
    Legacy(LegacyStudentDocument),
}

/// RFC 3339 in UTC, keeping exactly as many fractional digits as needed
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(ts) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| RegistrarError::invalid(format!("Invalid payment timestamp: {ts:?}.")))
}
