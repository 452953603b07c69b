//! Data File
//!
//! Loads and saves the whole record set as one JSON document.
//!
//! ## Load
//! - Missing, empty or whitespace-only file → no records
//! - Leading BOM stripped
//! - Unparsable document → backup, repair, or a storage error
//! - Each record decoded and validated on its own; bad ones are skipped
//!
//! ## Save
//! - Every record re-validated first; one failure aborts the save
//! - Written through [`StagedWrite`] so the target is replaced atomically

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use super::atomic::StagedWrite;
use super::document::{ListedStudentDocument, StudentDocument};
use super::recovery::{self, LoadReport};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{RegistrarError, Result};
use crate::record::{Student, StudentId};

/// Records keyed by id, as loaded from or saved to disk
pub type RecordMap = BTreeMap<StudentId, Student>;

/// Handle on the JSON data file
pub struct DataFile {
    /// Target path of the document
    path: PathBuf,

    /// Copy unparsable files aside before repair
    backup_corrupt: bool,

    /// Time source for backup names
    clock: Box<dyn Clock>,
}

impl DataFile {
    /// Data file at `path` with backups enabled and the wall clock
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_corrupt: true,
            clock: Box::new(SystemClock),
        }
    }

    /// Data file described by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_file).backup_corrupt(config.backup_corrupt)
    }

    pub fn backup_corrupt(mut self, enabled: bool) -> Self {
        self.backup_corrupt = enabled;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Read every valid record from the file
    pub fn load(&self) -> Result<(RecordMap, LoadReport)> {
        let mut report = LoadReport::default();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "data file not found, starting empty");
                return Ok((RecordMap::new(), report));
            }
            Err(e) => {
                return Err(RegistrarError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let text = recovery::strip_bom(&text);
        if text.trim().is_empty() {
            info!(path = %self.path.display(), "data file is empty");
            return Ok((RecordMap::new(), report));
        }

        let document = match recovery::parse_document(text) {
            Some(document) => document,
            None => self.recover(text, &mut report)?,
        };

        let records = decode_records(document, &mut report);
        report.records_loaded = records.len();

        info!(
            path = %self.path.display(),
            loaded = report.records_loaded,
            skipped = report.records_skipped,
            "loaded student records"
        );
        Ok((records, report))
    }

    /// Back up the corrupt file, then try to cut a document out of it
    fn recover(&self, text: &str, report: &mut LoadReport) -> Result<Value> {
        warn!(path = %self.path.display(), "data file is not valid JSON, attempting repair");

        if self.backup_corrupt {
            let backup = recovery::backup_corrupt(&self.path, self.clock.now()).map_err(|e| {
                RegistrarError::Storage(format!(
                    "failed to back up corrupt {}: {e}",
                    self.path.display()
                ))
            })?;
            warn!(backup = %backup.display(), "backed up corrupt data file");
            report.backup_path = Some(backup);
        }

        match recovery::repair(text) {
            Some(document) => {
                warn!(path = %self.path.display(), "repaired data file");
                report.repaired = true;
                Ok(document)
            }
            None => {
                error!(path = %self.path.display(), "data file is corrupt beyond repair");
                Err(RegistrarError::Storage(format!(
                    "corrupt or unreadable data file: {}",
                    self.path.display()
                )))
            }
        }
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Validate every record, then atomically replace the file
    pub fn save(&self, records: &RecordMap) -> Result<()> {
        for student in records.values() {
            student.validate()?;
        }

        let documents: BTreeMap<StudentId, StudentDocument> = records
            .iter()
            .map(|(&id, student)| (id, StudentDocument::from(student)))
            .collect();
        let bytes = serde_json::to_vec_pretty(&documents)?;

        self.write(&bytes).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to save data file");
            RegistrarError::Storage(format!("failed to save {}: {e}", self.path.display()))
        })?;

        info!(
            path = %self.path.display(),
            count = records.len(),
            "saved student records"
        );
        Ok(())
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        StagedWrite::stage(&self.path, bytes)?.commit()
    }
}

/// Decode every record in the document, skipping the ones that fail
fn decode_records(document: Value, report: &mut LoadReport) -> RecordMap {
    let mut records = RecordMap::new();

    let mut keep = |label: String, decoded: Result<Student>| match decoded {
        Ok(student) => {
            if records.insert(student.id(), student).is_some() {
                warn!(record = %label, "duplicate student id, keeping the later record");
            }
        }
        Err(e) => {
            warn!(record = %label, error = %e, "skipping invalid student record");
            report.records_skipped += 1;
        }
    };

    match document {
        Value::Object(map) => {
            for (key, value) in map {
                let decoded = decode_keyed(&key, value);
                keep(key, decoded);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.into_iter().enumerate() {
                keep(format!("#{index}"), decode_embedded(value));
            }
        }
        _ => {}
    }

    records
}

/// A record stored under its id: `{"7": {...}}`
fn decode_keyed(key: &str, value: Value) -> Result<Student> {
    let id = parse_id(key)?;
    let document: StudentDocument = serde_json::from_value(value)?;
    if let Some(embedded) = document.id.filter(|&e| e != i64::from(id)) {
        warn!(key, embedded, "embedded id disagrees with key, using key");
    }
    document.into_student(id)
}

/// A record in an array, carrying its own id: `[{"id": 7, ...}]`.
/// Both the current record shape and the older one are accepted.
fn decode_embedded(value: Value) -> Result<Student> {
    let id = match &value {
        Value::Object(fields) => embedded_id(fields)?,
        _ => return Err(RegistrarError::invalid("Record is not a JSON object.")),
    };
    match serde_json::from_value(value)? {
        ListedStudentDocument::Current(document) => document.into_student(id),
        ListedStudentDocument::Legacy(document) => {
            let dropped = document.unnamed_marks();
            if dropped > 0 {
                warn!(id, dropped, "legacy record has scores without subjects, dropping them");
            }
            document.into_student(id)
        }
    }
}

fn embedded_id(fields: &Map<String, Value>) -> Result<StudentId> {
    fields
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| StudentId::try_from(id).ok())
        .filter(|&id| id > 0)
        .ok_or_else(|| RegistrarError::invalid("Record has no valid id."))
}

fn parse_id(key: &str) -> Result<StudentId> {
    key.trim()
        .parse::<StudentId>()
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| RegistrarError::invalid(format!("Invalid student id {key:?}.")))
}
