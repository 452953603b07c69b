//! Configuration for registrar
//!
//! Centralized configuration with sensible defaults. The data file is carried
//! here and handed to [`Portal::open`](crate::Portal::open); nothing in the
//! crate reads a global path.

use std::path::PathBuf;

use crate::error::{RegistrarError, Result};

/// Default data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Main configuration for a registrar session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// JSON file holding every student record.
    /// Siblings created next to it:
    ///   {data_file}.tmp                         (in-flight atomic write)
    ///   {data_file}.corrupt-{timestamp}.bak     (copy of an unparsable file)
    pub data_file: PathBuf,

    // -------------------------------------------------------------------------
    // Recovery Configuration
    // -------------------------------------------------------------------------
    /// Copy a corrupt data file aside before attempting repair
    pub backup_corrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            backup_corrupt: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration names a usable file path
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(RegistrarError::Config(
                "data file path must not be empty".to_string(),
            ));
        }
        if self.data_file.file_name().is_none() {
            return Err(RegistrarError::Config(format!(
                "data file path has no file name: {}",
                self.data_file.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Enable or disable backups of corrupt data files
    pub fn backup_corrupt(mut self, enabled: bool) -> Self {
        self.config.backup_corrupt = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
