//! Error types for registrar
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::record::StudentId;

/// Result type alias using RegistrarError
pub type Result<T> = std::result::Result<T, RegistrarError>;

/// Unified error type for registrar operations
#[derive(Debug, Error)]
pub enum RegistrarError {
    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    /// A field value was rejected. The caller's state is unchanged.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Student not found: {0}")]
    NotFound(StudentId),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RegistrarError {
    /// Shorthand for building a validation error
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for every failure that originates at the file boundary
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Io(_) | Self::Serialization(_)
        )
    }
}
