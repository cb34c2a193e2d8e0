//! # Ledger
//!
//! Builders for the two entries the processors append, and the finance
//! summary computed over the whole log.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{LedgerEntry, Order, Purchase, TransactionKind};
use crate::{PURCHASE_CATEGORY, SALE_CATEGORY};

/// INCOME entry for a completed sale, dated with the order.
pub fn sale_entry(order: &Order) -> LedgerEntry {
    LedgerEntry {
        id: Uuid::new_v4().to_string(),
        date: order.date,
        kind: TransactionKind::Income,
        category: SALE_CATEGORY.to_string(),
        amount_cents: order.total_cents,
        description: format!("Venta #{}", order.id),
        reference_id: Some(order.id.clone()),
    }
}

/// EXPENSE entry for a supplier purchase, dated with the purchase.
pub fn purchase_entry(purchase: &Purchase) -> LedgerEntry {
    LedgerEntry {
        id: Uuid::new_v4().to_string(),
        date: purchase.date,
        kind: TransactionKind::Expense,
        category: PURCHASE_CATEGORY.to_string(),
        amount_cents: purchase.total_cents,
        description: format!("Compra a {}", purchase.supplier_name),
        reference_id: Some(purchase.id.clone()),
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Totals over a set of ledger entries.
///
/// ```rust
/// use mostrador_core::ledger::LedgerSummary;
///
/// let summary = LedgerSummary::default();
/// assert_eq!(summary.balance_cents, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LedgerSummary {
    pub income_cents: i64,
    pub expense_cents: i64,
    /// income − expense.
    pub balance_cents: i64,
    pub entry_count: usize,
}

impl LedgerSummary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut income = Money::zero();
        let mut expense = Money::zero();
        let mut balance = Money::zero();
        let mut entry_count = 0;

        for entry in entries {
            match entry.kind {
                TransactionKind::Income => income += entry.amount(),
                TransactionKind::Expense => expense += entry.amount(),
            }
            balance += entry.signed_amount();
            entry_count += 1;
        }

        LedgerSummary {
            income_cents: income.cents(),
            expense_cents: expense.cents(),
            balance_cents: balance.cents(),
            entry_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(kind: TransactionKind, amount_cents: i64) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            kind,
            category: String::new(),
            amount_cents,
            description: String::new(),
            reference_id: None,
        }
    }

    #[test]
    fn test_summary() {
        let entries = vec![
            entry(TransactionKind::Income, 2550),
            entry(TransactionKind::Income, 1000),
            entry(TransactionKind::Expense, 2250),
        ];
        let summary = LedgerSummary::from_entries(&entries);

        assert_eq!(summary.income_cents, 3550);
        assert_eq!(summary.expense_cents, 2250);
        assert_eq!(summary.balance_cents, 1300);
        assert_eq!(summary.entry_count, 3);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let entries = [entry(TransactionKind::Expense, 500)];
        assert_eq!(LedgerSummary::from_entries(&entries).balance_cents, -500);
    }
}
