//! Tests for Fees
//!
//! These tests verify:
//! - Construction with preset amounts
//! - Total updates (including dropping below paid)
//! - Payments: positive amounts only, no overpayment
//! - Payment history ordering and timestamps

use chrono::{DateTime, TimeZone, Utc};
use registrar::{Fees, RegistrarError};

// =============================================================================
// Helper Functions
// =============================================================================

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_with_amounts() {
    let fees = Fees::with_amounts(1000.0, 200.0).unwrap();

    assert_eq!(fees.total(), 1000.0);
    assert_eq!(fees.paid(), 200.0);
    assert_eq!(fees.balance(), 800.0);
    assert!(fees.history().is_empty());
}

#[test]
fn test_new_is_empty() {
    let fees = Fees::new();
    assert_eq!(fees.total(), 0.0);
    assert_eq!(fees.paid(), 0.0);
    assert_eq!(fees.balance(), 0.0);
}

#[test]
fn test_negative_amounts_rejected() {
    assert!(matches!(
        Fees::with_amounts(-1.0, 0.0),
        Err(RegistrarError::Validation(_))
    ));
    assert!(matches!(
        Fees::with_amounts(10.0, -1.0),
        Err(RegistrarError::Validation(_))
    ));
}

// =============================================================================
// Total Tests
// =============================================================================

#[test]
fn test_set_total_invalid() {
    let mut fees = Fees::new();
    assert!(matches!(fees.set_total(-10.0), Err(RegistrarError::Validation(_))));
    assert!(matches!(
        fees.set_total(f64::INFINITY),
        Err(RegistrarError::Validation(_))
    ));
    assert_eq!(fees.total(), 0.0);
}

#[test]
fn test_set_total_below_paid_gives_negative_balance() {
    let mut fees = Fees::with_amounts(1000.0, 0.0).unwrap();
    fees.pay(600.0, at(9)).unwrap();

    fees.set_total(400.0).unwrap();

    assert_eq!(fees.total(), 400.0);
    assert_eq!(fees.paid(), 600.0);
    assert_eq!(fees.balance(), -200.0);
    assert!(!fees.can_pay(1.0));
}

// =============================================================================
// Payment Tests
// =============================================================================

#[test]
fn test_pay_valid() {
    let mut fees = Fees::with_amounts(1000.0, 0.0).unwrap();

    fees.pay(500.0, at(9)).unwrap();

    assert_eq!(fees.paid(), 500.0);
    assert_eq!(fees.balance(), 500.0);
}

#[test]
fn test_pay_exact_balance() {
    let mut fees = Fees::with_amounts(1000.0, 500.0).unwrap();
    fees.pay(500.0, at(9)).unwrap();
    assert_eq!(fees.balance(), 0.0);
}

#[test]
fn test_pay_overpayment_attempt() {
    let mut fees = Fees::with_amounts(1000.0, 500.0).unwrap();

    let err = fees.pay(500.01, at(9)).unwrap_err();

    match err {
        RegistrarError::Validation(msg) => assert!(msg.contains("Overpayment is not allowed")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(fees.paid(), 500.0);
    assert_eq!(fees.balance(), 500.0);
    assert!(fees.history().is_empty());
}

#[test]
fn test_pay_invalid_amount() {
    let mut fees = Fees::with_amounts(1000.0, 0.0).unwrap();

    for amount in [0.0, -100.0, f64::NAN] {
        let err = fees.pay(amount, at(9)).unwrap_err();
        assert!(matches!(err, RegistrarError::Validation(_)));
    }
    assert_eq!(fees.paid(), 0.0);
    assert!(fees.history().is_empty());
}

#[test]
fn test_pay_with_zero_total() {
    let mut fees = Fees::new();
    assert!(fees.pay(1.0, at(9)).is_err());
}

#[test]
fn test_can_pay_helper() {
    let fees = Fees::with_amounts(1000.0, 900.0).unwrap();
    assert!(fees.can_pay(100.0));
    assert!(!fees.can_pay(100.01));
    assert!(!fees.can_pay(0.0));
    assert!(!fees.can_pay(-5.0));
}

// =============================================================================
// History Tests
// =============================================================================

#[test]
fn test_payment_history_record() {
    let mut fees = Fees::with_amounts(1000.0, 0.0).unwrap();

    fees.pay(100.0, at(9)).unwrap();

    assert_eq!(fees.history().len(), 1);
    assert_eq!(fees.history()[0].amount(), 100.0);
    assert_eq!(fees.history()[0].at(), at(9));
}

#[test]
fn test_history_is_append_only_and_ordered() {
    let mut fees = Fees::with_amounts(1000.0, 0.0).unwrap();

    fees.pay(100.0, at(9)).unwrap();
    fees.pay(200.0, at(10)).unwrap();
    let _ = fees.pay(5000.0, at(11));
    fees.pay(50.0, at(12)).unwrap();

    let amounts: Vec<f64> = fees.history().iter().map(|p| p.amount()).collect();
    assert_eq!(amounts, vec![100.0, 200.0, 50.0]);
    assert_eq!(fees.paid(), 350.0);
    assert_eq!(fees.history()[2].at(), at(12));
}
