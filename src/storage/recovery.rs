//! Corrupt-file recovery
//!
//! When the data file no longer parses as JSON, the loader:
//! 1. Copies the file aside (`<name>.corrupt-<YYYYMMDDTHHMMSSZ>.bak`)
//! 2. Looks for the outermost `{…}` or `[…]` span and re-parses just that
//! 3. Gives up with a storage error if no span parses
//!
//! Per-record problems are not handled here; the loader skips bad records
//! individually and counts them in [`LoadReport`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Records that passed validation and are now in memory
    pub records_loaded: usize,

    /// Records dropped because they were malformed or invalid
    pub records_skipped: usize,

    /// Whether the document only parsed after trimming surrounding garbage
    pub repaired: bool,

    /// Copy of the corrupt file, if one was written
    pub backup_path: Option<PathBuf>,
}

impl LoadReport {
    /// Nothing was dropped and nothing needed fixing
    pub fn is_clean(&self) -> bool {
        self.records_skipped == 0 && !self.repaired
    }
}

/// Remove any leading byte-order marks
pub fn strip_bom(text: &str) -> &str {
    text.trim_start_matches('\u{feff}')
}

/// Parse `text` as a document: a JSON object or array at the top level
pub fn parse_document(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

/// Try to salvage a document from `text` by cutting it down to the
/// outermost brace or bracket span. The delimiter that opens first is tried
/// first.
pub fn repair(text: &str) -> Option<Value> {
    let mut spans: Vec<(usize, usize)> = [('{', '}'), ('[', ']')]
        .into_iter()
        .filter_map(|(open, close)| {
            let start = text.find(open)?;
            let end = text.rfind(close)?;
            (end > start).then_some((start, end))
        })
        .collect();
    spans.sort_unstable();

    spans
        .into_iter()
        .find_map(|(start, end)| parse_document(&text[start..=end]))
}

/// Where the backup of `target` taken at `at` goes.
///
/// A numeric suffix is added if a backup with the same timestamp exists.
pub fn backup_path(target: &Path, at: DateTime<Utc>) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = at.format("%Y%m%dT%H%M%SZ");

    let mut candidate = target.with_file_name(format!("{file_name}.corrupt-{stamp}.bak"));
    let mut n = 1;
    while candidate.exists() {
        candidate = target.with_file_name(format!("{file_name}.corrupt-{stamp}-{n}.bak"));
        n += 1;
    }
    candidate
}

/// Copy `target` to a fresh backup path and return that path
pub fn backup_corrupt(target: &Path, at: DateTime<Utc>) -> io::Result<PathBuf> {
    let backup = backup_path(target, at);
    fs::copy(target, &backup)?;
    Ok(backup)
}
