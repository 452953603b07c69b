//! Fee ledger
//!
//! Tracks the total due, the running sum paid, and an append-only list of
//! payments. `paid <= total` is enforced by [`Fees::pay`]; lowering the total
//! below what was already paid is allowed and shows up as a negative balance.

use chrono::{DateTime, Utc};

use super::finite;
use crate::error::{RegistrarError, Result};

/// One recorded payment
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    amount: f64,
    at: DateTime<Utc>,
}

impl Payment {
    /// Build a payment event; `amount` must be strictly positive
    pub fn new(amount: f64, at: DateTime<Utc>) -> Result<Self> {
        let amount = finite(amount, "Payment amount")?;
        if amount <= 0.0 {
            return Err(RegistrarError::invalid("Payment amount must be positive."));
        }
        Ok(Self { amount, at })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

/// A student's fee ledger
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fees {
    total: f64,
    paid: f64,
    history: Vec<Payment>,
}

impl Fees {
    /// Empty ledger: nothing due, nothing paid
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with preset amounts and no history
    pub fn with_amounts(total: f64, paid: f64) -> Result<Self> {
        Self::restore(total, paid, Vec::new())
    }

    /// Rebuild a ledger from persisted parts.
    ///
    /// Amounts must be non-negative. `paid` is not compared with `total` or
    /// with the history sum, since `set_total` may legitimately leave
    /// `paid > total`.
    pub fn restore(total: f64, paid: f64, history: Vec<Payment>) -> Result<Self> {
        let total = finite(total, "Total")?;
        let paid = finite(paid, "Paid")?;
        if total < 0.0 || paid < 0.0 {
            return Err(RegistrarError::invalid("Amounts must be non-negative."));
        }
        Ok(Self {
            total,
            paid,
            history,
        })
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn paid(&self) -> f64 {
        self.paid
    }

    /// Payments in the order they were made
    pub fn history(&self) -> &[Payment] {
        &self.history
    }

    /// The last `n` payments, oldest first
    pub fn recent(&self, n: usize) -> &[Payment] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Remaining amount due (negative if the total was lowered below `paid`)
    pub fn balance(&self) -> f64 {
        self.total - self.paid
    }

    /// Replace the total due. Not checked against `paid`.
    pub fn set_total(&mut self, total: f64) -> Result<()> {
        let total = finite(total, "Total")?;
        if total < 0.0 {
            return Err(RegistrarError::invalid("Total must be non-negative."));
        }
        self.total = total;
        Ok(())
    }

    /// Whether `amount` would be accepted by [`Fees::pay`]
    pub fn can_pay(&self, amount: f64) -> bool {
        amount.is_finite() && amount > 0.0 && self.paid + amount <= self.total
    }

    /// Record a payment made at `at`.
    ///
    /// Fails without touching the ledger on a non-positive amount or when the
    /// payment would exceed the total.
    pub fn pay(&mut self, amount: f64, at: DateTime<Utc>) -> Result<()> {
        let payment = Payment::new(amount, at)?;
        if !self.can_pay(amount) {
            return Err(RegistrarError::invalid(format!(
                "Overpayment is not allowed. Max remaining balance is {:.2}.",
                self.balance()
            )));
        }

        self.paid += payment.amount;
        self.history.push(payment);
        Ok(())
    }

    /// Re-check the invariants a persisted ledger must satisfy
    pub fn validate(&self) -> Result<()> {
        if !(self.total.is_finite() && self.paid.is_finite()) {
            return Err(RegistrarError::invalid("Amounts must be finite."));
        }
        if self.total < 0.0 || self.paid < 0.0 {
            return Err(RegistrarError::invalid("Amounts must be non-negative."));
        }
        if self
            .history
            .iter()
            .any(|p| !p.amount.is_finite() || p.amount <= 0.0)
        {
            return Err(RegistrarError::invalid(
                "Payment history holds a non-positive amount.",
            ));
        }
        Ok(())
    }
}
