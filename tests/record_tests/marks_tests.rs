//! Tests for Marks
//!
//! These tests verify:
//! - Setting and overwriting scores
//! - Score range and subject validation
//! - Idempotent removal
//! - Average of empty and non-empty sets

use registrar::{Marks, RegistrarError};

// =============================================================================
// Set / Get Tests
// =============================================================================

#[test]
fn test_from_scores() {
    let marks = Marks::from_scores([("math", 90.0), ("science", 85.0)]).unwrap();

    assert_eq!(marks.len(), 2);
    assert_eq!(marks.get("math"), Some(90.0));
    assert_eq!(marks.get("science"), Some(85.0));
}

#[test]
fn test_set_mark_valid() {
    let mut marks = Marks::new();

    marks.set_mark("physics", 75.5).unwrap();
    assert_eq!(marks.get("physics"), Some(75.5));

    marks.set_mark("physics", 80.0).unwrap();
    assert_eq!(marks.get("physics"), Some(80.0));
    assert_eq!(marks.len(), 1);
}

#[test]
fn test_subject_is_trimmed() {
    let mut marks = Marks::new();

    marks.set_mark("  History ", 64.0).unwrap();

    assert_eq!(marks.get("History"), Some(64.0));
    assert_eq!(marks.get(" History"), Some(64.0));
    assert_eq!(marks.iter().next(), Some(("History", 64.0)));
}

#[test]
fn test_boundary_scores_accepted() {
    let mut marks = Marks::new();
    marks.set_mark("low", 0.0).unwrap();
    marks.set_mark("high", 100.0).unwrap();
    assert_eq!(marks.len(), 2);
}

#[test]
fn test_set_mark_invalid_score() {
    let mut marks = Marks::new();

    for score in [101.0, -10.0, 100.0001, f64::NAN] {
        let err = marks.set_mark("bad_score", score).unwrap_err();
        assert!(matches!(err, RegistrarError::Validation(_)));
    }
    assert!(marks.is_empty());
}

#[test]
fn test_set_mark_empty_subject() {
    let mut marks = Marks::new();

    for subject in ["", " ", "\t\n"] {
        match marks.set_mark(subject, 50.0).unwrap_err() {
            RegistrarError::Validation(msg) => {
                assert!(msg.contains("Subject name cannot be empty"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
    assert!(marks.is_empty());
}

// =============================================================================
// Remove Tests
// =============================================================================

#[test]
fn test_remove_mark() {
    let mut marks = Marks::from_scores([("math", 90.0), ("science", 85.0)]).unwrap();

    assert!(marks.remove_mark("math"));
    assert_eq!(marks.get("math"), None);
    assert_eq!(marks.len(), 1);
}

#[test]
fn test_remove_missing_mark_is_noop() {
    let mut marks = Marks::from_scores([("math", 90.0)]).unwrap();

    assert!(!marks.remove_mark("nonexistent"));
    assert!(!marks.remove_mark("nonexistent"));
    assert_eq!(marks.len(), 1);
}

// =============================================================================
// Average Tests
// =============================================================================

#[test]
fn test_average() {
    let marks = Marks::from_scores([("A", 100.0), ("B", 90.0), ("C", 80.0)]).unwrap();
    assert!((marks.average() - 90.0).abs() < 1e-9);
}

#[test]
fn test_average_empty_is_exactly_zero() {
    let marks = Marks::new();
    assert_eq!(marks.average(), 0.0);
    assert!(!marks.average().is_nan());
}

#[test]
fn test_average_after_removing_everything() {
    let mut marks = Marks::from_scores([("A", 40.0)]).unwrap();
    marks.remove_mark("A");
    assert_eq!(marks.average(), 0.0);
}
