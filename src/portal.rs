//! Portal Module
//!
//! A session binding one [`RecordStore`] to one data file.
//!
//! ## Responsibilities
//! - Load the data file at open
//! - Apply each mutation to the store, then save
//! - Save once more on close
//!
//! ## Failure Model
//! A rejected mutation (validation, unknown id) changes nothing and writes
//! nothing. A mutation that succeeds in memory but fails to save returns the
//! storage error and stays applied in memory; the next successful save
//! persists it.

use std::path::Path;

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::record::{Student, StudentId};
use crate::storage::{DataFile, LoadReport};
use crate::store::RecordStore;

/// Record store plus the file it is persisted to
pub struct Portal {
    /// Session configuration
    config: Config,

    /// Load/save boundary for `config.data_file`
    file: DataFile,

    /// In-memory records
    store: RecordStore,

    /// What happened when the file was loaded
    load_report: LoadReport,
}

impl Portal {
    /// Open a session using the wall clock
    pub fn open(config: Config) -> Result<Self> {
        Self::open_with_clock(config, SystemClock)
    }

    /// Open a session with an injected clock
    ///
    /// On open:
    /// 1. Validate the config
    /// 2. Load the data file (missing file → empty store)
    /// 3. Seed the store and its id counter from the loaded records
    pub fn open_with_clock<C>(config: Config, clock: C) -> Result<Self>
    where
        C: Clock + Clone + 'static,
    {
        config.validate()?;

        let file = DataFile::from_config(&config).with_clock(clock.clone());
        let (records, load_report) = file.load()?;

        if load_report.records_skipped > 0 {
            warn!(
                skipped = load_report.records_skipped,
                "some student records could not be loaded"
            );
        }
        info!(
            path = %config.data_file.display(),
            students = records.len(),
            "portal opened"
        );

        let store = RecordStore::from_records(records.into_values(), clock);
        Ok(Self {
            config,
            file,
            store,
            load_report,
        })
    }

    // =========================================================================
    // Mutations (each one saves on success)
    // =========================================================================

    /// Add a student and return the assigned id
    pub fn add_student(&mut self, name: &str, branch: &str, year: u8) -> Result<StudentId> {
        let id = self.store.create(name, branch, year)?.id();
        self.save()?;
        Ok(id)
    }

    pub fn delete_student(&mut self, id: StudentId) -> Result<Student> {
        let student = self.store.delete(id)?;
        self.save()?;
        Ok(student)
    }

    pub fn set_total_fees(&mut self, id: StudentId, total: f64) -> Result<()> {
        self.store.set_total_fees(id, total)?;
        self.save()
    }

    pub fn pay_fees(&mut self, id: StudentId, amount: f64) -> Result<()> {
        self.store.pay_fees(id, amount)?;
        self.save()
    }

    pub fn set_mark(&mut self, id: StudentId, subject: &str, score: f64) -> Result<()> {
        self.store.set_mark(id, subject, score)?;
        self.save()
    }

    /// Remove a mark; saves only if something was removed
    pub fn remove_mark(&mut self, id: StudentId, subject: &str) -> Result<bool> {
        let removed = self.store.remove_mark(id, subject)?;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current records to the data file
    pub fn save(&self) -> Result<()> {
        self.file.save(self.store.records())
    }

    /// Save and end the session
    pub fn close(self) -> Result<()> {
        self.save()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.store.get(id)
    }

    pub fn students(&self) -> Vec<&Student> {
        self.store.list()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_file(&self) -> &Path {
        self.file.path()
    }
}
