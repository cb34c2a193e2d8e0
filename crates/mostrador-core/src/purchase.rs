//! # Supplier Purchases
//!
//! Restocking requests. A purchase raises stock, sets each product's cost
//! to the price just paid, and books one expense.
//!
//! ## Last-Purchase Cost
//! ```text
//! Product "Coca Cola": cost 1.00, stock 200
//!      │
//!      ▼  purchase 24 × 0.85
//! Product "Coca Cola": cost 0.85, stock 224
//! ```
//! The previous cost is overwritten, not averaged. Margins shown against
//! `Product::cost` always reflect the latest invoice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::ledger;
use crate::money::Money;
use crate::types::{LedgerEntry, Purchase, PurchaseLine};
use crate::validation::{
    validate_amount_cents, validate_line_count, validate_name, validate_optional_text,
    validate_purchase_quantity, validate_reference, ValidationResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewPurchaseLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_cost_cents: i64,
    /// Must equal quantity × unit cost.
    pub line_total_cents: i64,
}

impl NewPurchaseLine {
    fn validate(&self) -> ValidationResult<Money> {
        validate_reference("productId", &self.product_id)?;
        validate_name("productName", &self.product_name, 200)?;
        validate_purchase_quantity(self.quantity)?;
        validate_amount_cents("unitCost", self.unit_cost_cents)?;

        let expected = Money::from_cents(self.unit_cost_cents)
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "lineTotal".to_string(),
                min: 0,
                max: i64::MAX,
            })?;

        if expected.cents() != self.line_total_cents {
            return Err(ValidationError::Mismatch {
                field: "lineTotal".to_string(),
                expected: expected.cents(),
                actual: self.line_total_cents,
            });
        }
        Ok(expected)
    }
}

/// A purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewPurchase {
    /// Invoice date; defaults to now. Also dates the expense entry.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
    pub supplier_id: String,
    pub supplier_name: String,
    pub items: Vec<NewPurchaseLine>,
    pub total_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPurchase {
    pub purchase: Purchase,
    pub ledger_entry: LedgerEntry,
}

impl NewPurchase {
    /// Checks the request and returns the total derived from the lines.
    pub fn validate(&self) -> ValidationResult<Money> {
        validate_reference("supplierId", &self.supplier_id)?;
        validate_name("supplierName", &self.supplier_name, 200)?;
        validate_line_count("items", self.items.len())?;
        validate_optional_text("notes", self.notes.as_deref(), 1000)?;

        let mut computed = Money::zero();
        for line in &self.items {
            let line_total = line.validate()?;
            computed = computed
                .checked_add(line_total)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "total".to_string(),
                    min: 0,
                    max: i64::MAX,
                })?;
        }

        if computed.cents() != self.total_cents {
            return Err(ValidationError::Mismatch {
                field: "total".to_string(),
                expected: computed.cents(),
                actual: self.total_cents,
            });
        }
        Ok(computed)
    }

    pub fn prepare(self, now: DateTime<Utc>) -> CoreResult<PreparedPurchase> {
        let total = self.validate()?;
        let purchase_id = Uuid::new_v4().to_string();

        let items = self
            .items
            .into_iter()
            .map(|line| PurchaseLine {
                id: Uuid::new_v4().to_string(),
                purchase_id: purchase_id.clone(),
                product_id: line.product_id.trim().to_string(),
                product_name: line.product_name.trim().to_string(),
                quantity: line.quantity,
                unit_cost_cents: line.unit_cost_cents,
                line_total_cents: line.line_total_cents,
            })
            .collect();

        let purchase = Purchase {
            id: purchase_id,
            date: self.date.unwrap_or(now),
            supplier_id: self.supplier_id.trim().to_string(),
            supplier_name: self.supplier_name.trim().to_string(),
            total_cents: total.cents(),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            items,
        };
        let ledger_entry = ledger::purchase_entry(&purchase);

        Ok(PreparedPurchase { purchase, ledger_entry })
    }
}
