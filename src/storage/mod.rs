//! Storage Module
//!
//! Durable persistence of the record set as a single JSON document.
//!
//! ## Responsibilities
//! - Load records from disk, validating each one independently
//! - Save records with an atomic temp-file + rename
//! - Back up and repair a document that no longer parses
//!
//! ## File Format
//! ```text
//! {
//!   "<id>": {
//!     "id": <int>, "name": <string>, "branch": <string>, "year": <1..5>,
//!     "marks": { "<subject>": <0..100>, ... },
//!     "fees": {
//!       "total": <>=0>, "paid": <>=0>,
//!       "history": [ { "amount": <>0>, "ts": "<ISO-8601>" }, ... ]
//!     }
//!   },
//!   ...
//! }
//! ```
//!
//! Older files hold a list instead, one object per student with its own
//! `id`, a bare list of scores and a single fee amount. They are read but
//! never written.
//!
//! ## Files on Disk
//! ```text
//! students.json                                 (the document)
//! students.json.tmp                             (only during a save)
//! students.json.corrupt-20240105T100000Z.bak    (after a failed parse)
//! ```

mod atomic;
mod data_file;
mod document;
mod recovery;

use std::path::Path;

pub use atomic::{write_atomic, StagedWrite};
pub use data_file::{DataFile, RecordMap};
pub use document::{
    format_timestamp, parse_timestamp, FeesDocument, LegacyStudentDocument,
    ListedStudentDocument, PaymentDocument, StudentDocument,
};
pub use recovery::{backup_path, repair, LoadReport};

use crate::error::Result;

/// Load records from `path` with default recovery settings
pub fn load(path: &Path) -> Result<RecordMap> {
    DataFile::new(path).load().map(|(records, _)| records)
}

/// Save `records` to `path`
pub fn save(records: &RecordMap, path: &Path) -> Result<()> {
    DataFile::new(path).save(records)
}
