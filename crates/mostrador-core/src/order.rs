//! # Sale Requests
//!
//! A [`NewOrder`] is what the counter sends at checkout. [`NewOrder::prepare`]
//! validates it and turns it into the records the order processor writes,
//! all before any storage is touched.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewOrder (cart snapshot from the client)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prepare(now)  ← THIS MODULE                                            │
//! │  ├── 1..=100 lines, quantity 1..=999, price ≥ 0                         │
//! │  ├── total == Σ unit_price × quantity                                   │
//! │  └── ids: order UUID, line UUIDs                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PreparedOrder { order, ledger_entry }                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderProcessor (mostrador-db): one unit of work                        │
//! │  ├── insert order + lines                                               │
//! │  ├── decrement stock per line                                           │
//! │  ├── client stats                                                       │
//! │  ├── INCOME ledger entry                                                │
//! │  └── register += total (cash only)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::ledger;
use crate::money::Money;
use crate::types::{LedgerEntry, Order, OrderLine, OrderStatus, PaymentMethod};
use crate::validation::{
    validate_amount_cents, validate_line_count, validate_name, validate_optional_text,
    validate_quantity, validate_reference, ValidationResult,
};

// =============================================================================
// Request Types
// =============================================================================

/// One cart line as sent at checkout: product reference plus the name and
/// price the customer saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl CartLine {
    /// unit price × quantity, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        Money::from_cents(self.unit_price_cents).checked_multiply_quantity(self.quantity)
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_reference("productId", &self.product_id)?;
        validate_name("name", &self.name, 200)?;
        validate_amount_cents("unitPrice", self.unit_price_cents)?;
        validate_quantity(self.quantity)?;
        Ok(())
    }
}

/// A checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewOrder {
    pub items: Vec<CartLine>,
    pub payment_method: PaymentMethod,
    /// Caller-computed total; re-checked against the lines.
    pub total_cents: i64,
    #[serde(default)]
    pub client_id: Option<String>,
    /// Table label for dine-in orders.
    #[serde(default)]
    pub table: Option<String>,
}

/// The records an accepted order produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedOrder {
    pub order: Order,
    pub ledger_entry: LedgerEntry,
}

impl PreparedOrder {
    /// Amount the open register must receive, if any.
    pub fn cash_amount(&self) -> Option<Money> {
        self.order.payment_method.is_cash().then(|| self.order.total())
    }
}

// =============================================================================
// Validation & Preparation
// =============================================================================

impl NewOrder {
    /// Checks the request and returns the total derived from the lines.
    ///
    /// ```rust
    /// use mostrador_core::order::{CartLine, NewOrder};
    /// use mostrador_core::{PaymentMethod, ValidationError};
    ///
    /// let order = NewOrder {
    ///     items: vec![CartLine {
    ///         product_id: "2".into(),
    ///         name: "Papas Fritas".into(),
    ///         unit_price_cents: 450,
    ///         quantity: 3,
    ///     }],
    ///     payment_method: PaymentMethod::Card,
    ///     total_cents: 1300,
    ///     client_id: None,
    ///     table: None,
    /// };
    ///
    /// assert_eq!(
    ///     order.validate(),
    ///     Err(ValidationError::Mismatch { field: "total".into(), expected: 1350, actual: 1300 })
    /// );
    /// ```
    pub fn validate(&self) -> ValidationResult<Money> {
        validate_line_count("items", self.items.len())?;

        let mut computed = Money::zero();
        for line in &self.items {
            line.validate()?;
            computed = line
                .line_total()
                .and_then(|t| computed.checked_add(t))
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

        if let Some(client_id) = self.client_ref() {
            validate_reference("clientId", client_id)?;
        }
        validate_optional_text("table", self.table.as_deref(), 50)?;

        Ok(computed)
    }

    /// Client id, treating an empty string as "no client".
    pub fn client_ref(&self) -> Option<&str> {
        self.client_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Validates and builds the order, its lines and its ledger entry.
    pub fn prepare(self, now: DateTime<Utc>) -> CoreResult<PreparedOrder> {
        let total = self.validate()?;
        let client_id = self.client_ref().map(str::to_string);
        let order_id = Uuid::new_v4().to_string();

        let items = self
            .items
            .into_iter()
            .map(|line| OrderLine {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                line_total_cents: line.unit_price_cents * line.quantity,
                product_id: line.product_id.trim().to_string(),
                name_snapshot: line.name.trim().to_string(),
                unit_price_cents: line.unit_price_cents,
                quantity: line.quantity,
            })
            .collect();

        let order = Order {
            id: order_id,
            date: now,
            total_cents: total.cents(),
            payment_method: self.payment_method,
            status: OrderStatus::Completed,
            client_id,
            table_label: self
                .table
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            items,
        };
        let ledger_entry = ledger::sale_entry(&order);

        Ok(PreparedOrder { order, ledger_entry })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
