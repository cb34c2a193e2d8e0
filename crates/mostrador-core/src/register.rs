//! # Cash Register
//!
//! State machine for the single cash drawer and its reconciliation
//! ("arqueo").
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     ┌──────────┐   open(initial)    ┌──────────┐                        │
//! │     │  CLOSED  │ ─────────────────▶ │   OPEN   │ ◀──┐ cash sale:        │
//! │     │ (or none)│                    │          │ ───┘ current += total  │
//! │     └──────────┘ ◀───────────────── └──────────┘      expected += total │
//! │                    close(counted)                                       │
//! │                    variance = counted − expected                        │
//! │                                                                         │
//! │  open() while OPEN    → RegisterAlreadyOpen                             │
//! │  close() while CLOSED → RegisterClosed                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every open creates a new session row; a closed session keeps its
//! closing snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CashRegister;
use crate::validation::{validate_amount_cents, ValidationResult};

/// What a close writes to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterClosing {
    pub register_id: String,
    pub closed_at: DateTime<Utc>,
    pub counted_amount_cents: i64,
    pub variance_cents: i64,
}

/// Expected vs counted cash, without closing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Reconciliation {
    pub expected_cents: i64,
    pub counted_cents: i64,
    /// counted − expected. Negative means cash is missing.
    pub variance_cents: i64,
}

impl Reconciliation {
    pub fn new(expected: Money, counted: Money) -> Self {
        Reconciliation {
            expected_cents: expected.cents(),
            counted_cents: counted.cents(),
            variance_cents: (counted - expected).cents(),
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.variance_cents == 0
    }
}

impl CashRegister {
    /// A fresh open session with current = expected = initial.
    pub fn open(initial: Money, now: DateTime<Utc>) -> CoreResult<CashRegister> {
        validate_amount_cents("initialAmount", initial.cents())?;

        Ok(CashRegister {
            id: Uuid::new_v4().to_string(),
            is_open: true,
            opened_at: now,
            initial_amount_cents: initial.cents(),
            current_amount_cents: initial.cents(),
            expected_amount_cents: initial.cents(),
            closed_at: None,
            counted_amount_cents: None,
            variance_cents: None,
        })
    }

    /// Fails when `latest` is an open session.
    pub fn ensure_can_open(latest: Option<&CashRegister>) -> CoreResult<()> {
        match latest {
            Some(register) if register.is_open => Err(CoreError::RegisterAlreadyOpen {
                opened_at: register.opened_at.to_rfc3339(),
            }),
            _ => Ok(()),
        }
    }

    /// Computes the closing snapshot for a counted drawer.
    pub fn close(&self, counted: Money, now: DateTime<Utc>) -> CoreResult<RegisterClosing> {
        if !self.is_open {
            return Err(CoreError::RegisterClosed);
        }
        validate_amount_cents("countedAmount", counted.cents())?;

        Ok(RegisterClosing {
            register_id: self.id.clone(),
            closed_at: now,
            counted_amount_cents: counted.cents(),
            variance_cents: self.reconcile(counted).variance_cents,
        })
    }

    /// Writes a closing snapshot onto this session.
    pub fn apply_closing(&mut self, closing: &RegisterClosing) {
        self.is_open = false;
        self.closed_at = Some(closing.closed_at);
        self.counted_amount_cents = Some(closing.counted_amount_cents);
        self.variance_cents = Some(closing.variance_cents);
    }

    /// Adds a cash sale to the drawer. Nothing changes on overflow.
    pub fn credit(&mut self, amount: Money) -> ValidationResult<()> {
        let current = Money::from_cents(self.current_amount_cents).checked_add(amount);
        let expected = Money::from_cents(self.expected_amount_cents).checked_add(amount);

        match (current, expected) {
            (Some(current), Some(expected)) => {
                self.current_amount_cents = current.cents();
                self.expected_amount_cents = expected.cents();
                Ok(())
            }
            _ => Err(ValidationError::overflow("cashRegister", i64::MAX)),
        }
    }

    pub fn reconcile(&self, counted: Money) -> Reconciliation {
        Reconciliation::new(Money::from_cents(self.expected_amount_cents), counted)
    }

    /// Cash taken since the session opened (expected − initial).
    pub fn cash_sales(&self) -> Money {
        Money::from_cents(self.expected_amount_cents - self.initial_amount_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(cents: i64) -> CashRegister {
        CashRegister::open(Money::from_cents(cents), Utc::now()).unwrap()
    }

    #[test]
    fn test_open_sets_all_amounts() {
        let register = open_with(10000);
        assert!(register.is_open);
        assert_eq!(register.current_amount_cents, 10000);
        assert_eq!(register.expected_amount_cents, 10000);
        assert_eq!(register.cash_sales(), Money::zero());
    }

    #[test]
    fn test_negative_float_rejected() {
        assert!(matches!(
            CashRegister::open(Money::from_cents(-1), Utc::now()),
            Err(CoreError::Validation(ValidationError::Negative { .. }))
        ));
    }

    #[test]
    fn test_float_above_ceiling_rejected() {
        assert!(matches!(
            CashRegister::open(Money::from_cents(i64::MAX), Utc::now()),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_credit_overflow_leaves_drawer_unchanged() {
        let mut register = open_with(10000);
        register.expected_amount_cents = i64::MAX - 50;
        register.current_amount_cents = i64::MAX - 50;

        assert_eq!(
            register.credit(Money::from_cents(100)),
            Err(ValidationError::overflow("cashRegister", i64::MAX))
        );
        assert_eq!(register.expected_amount_cents, i64::MAX - 50);
        assert_eq!(register.current_amount_cents, i64::MAX - 50);
    }

    #[test]
    fn test_cannot_open_twice() {
        let register = open_with(10000);
        assert!(matches!(
            CashRegister::ensure_can_open(Some(&register)),
            Err(CoreError::RegisterAlreadyOpen { .. })
        ));
        assert!(CashRegister::ensure_can_open(None).is_ok());
    }

    #[test]
    fn test_cash_sale_then_close_with_shortfall() {
        let mut register = open_with(10000);
        register.credit(Money::from_cents(2550)).unwrap();
        assert_eq!(register.expected_amount_cents, 12550);
        assert_eq!(register.current_amount_cents, 12550);
        assert_eq!(register.cash_sales().cents(), 2550);

        let closing = register.close(Money::from_cents(12000), Utc::now()).unwrap();
        assert_eq!(closing.variance_cents, -550);

        register.apply_closing(&closing);
        assert!(!register.is_open);
        assert_eq!(register.counted_amount_cents, Some(12000));
        assert_eq!(register.variance_cents, Some(-550));

        // A closed session can be reopened, but not closed again
        assert!(CashRegister::ensure_can_open(Some(&register)).is_ok());
        assert!(matches!(
            register.close(Money::from_cents(0), Utc::now()),
            Err(CoreError::RegisterClosed)
        ));
    }

    #[test]
    fn test_reconcile_has_no_side_effect() {
        let register = open_with(5000);
        let preview = register.reconcile(Money::from_cents(5000));
        assert!(preview.is_balanced());
        assert!(register.is_open);
        assert_eq!(register.counted_amount_cents, None);
    }
}
