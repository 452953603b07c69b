//! Tests for atomic replacement
//!
//! These tests verify:
//! - A staged write that is never committed leaves the target untouched
//! - The temp file is visible while staged and gone afterwards
//! - Commit replaces existing content in one step

use std::fs;
use std::path::PathBuf;

use registrar::storage::{self, write_atomic, StagedWrite};
use tempfile::TempDir;

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.json");
    (temp_dir, path)
}

#[test]
fn test_crash_before_rename_keeps_original() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, br#"{"1": {"name": "Ann", "branch": "ME", "year": 1}}"#).unwrap();
    let before = fs::read(&path).unwrap();

    {
        let staged = StagedWrite::stage(&path, b"{}").unwrap();
        assert!(staged.tmp_path().exists());
        assert_eq!(staged.target(), path.as_path());
        assert_eq!(fs::read(&path).unwrap(), before);
        // Dropped without commit
    }

    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(!path.with_file_name("students.json.tmp").exists());
    assert_eq!(storage::load(&path).unwrap().len(), 1);
}

#[test]
fn test_staged_content_is_complete_before_commit() {
    let (_temp, path) = setup_temp_file();

    let staged = StagedWrite::stage(&path, b"[1, 2, 3]").unwrap();

    assert_eq!(fs::read(staged.tmp_path()).unwrap(), b"[1, 2, 3]\n");
    assert!(!path.exists());

    staged.commit().unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"[1, 2, 3]\n");
}

#[test]
fn test_commit_replaces_existing_file() {
    let (temp, path) = setup_temp_file();
    fs::write(&path, b"old content that is longer than the new one").unwrap();

    write_atomic(&path, b"new").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"new\n");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_stale_temp_file_is_overwritten() {
    let (_temp, path) = setup_temp_file();
    fs::write(path.with_file_name("students.json.tmp"), b"left over from a crash").unwrap();

    write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"{}\n");
    assert!(!path.with_file_name("students.json.tmp").exists());
}
