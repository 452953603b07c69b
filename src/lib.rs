//! # registrar
//!
//! A student record store with:
//! - Validated records (name, branch, year, marks, fee ledger)
//! - Atomic JSON persistence (temp file + rename)
//! - Corrupt-file backup and repair on load
//! - Per-record isolation: one bad record never blocks the rest
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CLI (bin/registrar)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Portal                               │
//! │             (mutate, then save on success)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RecordStore │          │  DataFile   │
//!   │ (in memory) │          │   (JSON)    │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Student   │          │ StagedWrite │
//!   │ Marks, Fees │          │  recovery   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod config;
pub mod error;

pub mod portal;
pub mod record;
pub mod report;
pub mod storage;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{RegistrarError, Result};
pub use portal::Portal;
pub use record::{Fees, Marks, Payment, Student, StudentId};
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of registrar
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
