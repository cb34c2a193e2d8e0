//! # Domain Types
//!
//! Records owned by the persistence layer and passed by value through the
//! services.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog              Relationships         Ledger & Cash               │
//! │  ─────────            ─────────────         ─────────────               │
//! │  Product              Client                LedgerEntry (append-only)   │
//! │  Category             Supplier              CashRegister (session)      │
//! │                                                                         │
//! │  Documents (immutable once created)                                     │
//! │  ─────────────────────────────────                                      │
//! │  Order ──< OrderLine          Purchase ──< PurchaseLine                 │
//! │    │                             │                                      │
//! │    └── LedgerEntry.reference_id ─┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Order and purchase lines copy the product name and price/cost at the time
//! of the document, so history survives later catalog edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;
use crate::MAX_STOCK;

// =============================================================================
// Product
// =============================================================================

/// A sellable or stocked item.
///
/// `category` holds the category *name*, not a foreign key. Deleting a
/// category leaves products pointing at the old name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Sale price in cents.
    pub price_cents: i64,
    /// Unit cost in cents; overwritten by every purchase (last-purchase cost).
    pub cost_cents: i64,
    /// Units on hand. Negative only under the `allow` stock policy.
    pub stock: i64,
    /// Unit label ("unidad", "kg", "botella", ...).
    pub unit: String,
    pub sku: String,
    pub image: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Adds purchased units and takes `unit_cost_cents` as the new cost.
    /// Returns the new stock; fails past MAX_STOCK and leaves the product
    /// as it was.
    pub fn receive(
        &mut self,
        qty: i64,
        unit_cost_cents: i64,
        now: DateTime<Utc>,
    ) -> ValidationResult<i64> {
        let stock = self
            .stock
            .checked_add(qty)
            .filter(|stock| *stock <= MAX_STOCK)
            .ok_or_else(|| ValidationError::overflow("stock", MAX_STOCK))?;

        self.stock = stock;
        self.cost_cents = unit_cost_cents;
        self.updated_at = now;
        Ok(stock)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Display grouping for products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// A customer with running purchase statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Sum of attributed order totals. Only the order processor moves it.
    pub total_spent_cents: i64,
    /// Number of attributed orders.
    pub visits: i64,
}

impl Client {
    #[inline]
    pub fn total_spent(&self) -> Money {
        Money::from_cents(self.total_spent_cents)
    }

    /// Attributes one order: total_spent += amount, visits += 1.
    pub fn record_visit(&mut self, amount: Money) -> ValidationResult<()> {
        let total_spent = self.total_spent().checked_add(amount);
        let visits = self.visits.checked_add(1);

        match (total_spent, visits) {
            (Some(total_spent), Some(visits)) => {
                self.total_spent_cents = total_spent.cents();
                self.visits = visits;
                Ok(())
            }
            _ => Err(ValidationError::overflow("totalSpent", i64::MAX)),
        }
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Contact person.
    pub contact: String,
    pub email: String,
    /// What they supply.
    pub category: String,
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash; moves the open register.
    Cash,
    /// Card on an external terminal.
    Card,
    /// Bank transfer.
    Transfer,
    /// Sold on credit ("fiado").
    Credit,
}

impl PaymentMethod {
    /// Only cash sales touch the register balance.
    #[inline]
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// =============================================================================
// Order Status
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Every order recorded by the processor is completed.
    #[default]
    Completed,
    Pending,
    Cancelled,
}

// =============================================================================
// Order
// =============================================================================

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub client_id: Option<String>,
    /// Restaurant table label, if any.
    pub table_label: Option<String>,
    /// Loaded separately from `order_lines`.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<OrderLine>,
}

impl Order {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}

/// A line of a recorded sale (snapshot of the cart item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price at time of sale (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// unit_price × quantity.
    pub line_total_cents: i64,
}

// =============================================================================
// Purchase
// =============================================================================

/// A recorded supplier purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Purchase {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub supplier_id: String,
    /// Supplier name at time of purchase (frozen).
    pub supplier_name: String,
    pub total_cents: i64,
    pub notes: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<PurchaseLine>,
}

impl Purchase {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseLine {
    pub id: String,
    pub purchase_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_cost_cents: i64,
    /// quantity × unit_cost.
    pub line_total_cents: i64,
}

// =============================================================================
// Ledger
// =============================================================================

/// Direction of a ledger entry.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// One money movement. Append-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LedgerEntry {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub category: String,
    /// Always non-negative; direction comes from `kind`.
    pub amount_cents: i64,
    pub description: String,
    /// Originating order or purchase id.
    pub reference_id: Option<String>,
}

impl LedgerEntry {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Signed amount: income positive, expense negative.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount(),
            TransactionKind::Expense => -self.amount(),
        }
    }
}

// =============================================================================
// Cash Register
// =============================================================================

/// A cash register session.
///
/// Exactly one row may have `is_open = true`. Closed sessions keep their
/// closing snapshot for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CashRegister {
    pub id: String,
    pub is_open: bool,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    pub initial_amount_cents: i64,
    /// Cash on hand.
    pub current_amount_cents: i64,
    /// Cash that should be in the drawer: initial + cash sales.
    pub expected_amount_cents: i64,
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,
    pub counted_amount_cents: Option<i64>,
    /// counted − expected, recorded at close.
    pub variance_cents: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: TransactionKind, amount_cents: i64) -> LedgerEntry {
        LedgerEntry {
            id: "t".to_string(),
            date: Utc::now(),
            kind,
            category: "Venta".to_string(),
            amount_cents,
            description: String::new(),
            reference_id: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(entry(TransactionKind::Income, 2550).signed_amount().cents(), 2550);
        assert_eq!(entry(TransactionKind::Expense, 2250).signed_amount().cents(), -2250);
    }

    #[test]
    fn test_only_cash_is_cash() {
        assert!(PaymentMethod::Cash.is_cash());
        assert!(!PaymentMethod::Card.is_cash());
        assert!(!PaymentMethod::Transfer.is_cash());
        assert!(!PaymentMethod::Credit.is_cash());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Transfer).unwrap(), "\"transfer\"");
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), "\"INCOME\"");
        assert_eq!(serde_json::to_string(&OrderStatus::default()).unwrap(), "\"completed\"");
    }

    #[test]
    fn test_product_camel_case_fields() {
        let now = Utc::now();
        let product = Product {
            id: "1".to_string(),
            name: "Papas Fritas".to_string(),
            category: "Entradas".to_string(),
            price_cents: 450,
            cost_cents: 150,
            stock: 100,
            unit: "porcion".to_string(),
            sku: "PAP-001".to_string(),
            image: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["priceCents"], 450);
        assert!(json["createdAt"].is_string());
    }

    fn juan(total_spent_cents: i64) -> Client {
        Client {
            id: "1".to_string(),
            name: "Juan Pérez".to_string(),
            phone: String::new(),
            email: String::new(),
            total_spent_cents,
            visits: 5,
        }
    }

    #[test]
    fn test_record_visit() {
        let mut client = juan(15_000);
        client.record_visit(Money::from_cents(2_000)).unwrap();
        assert_eq!(client.total_spent_cents, 17_000);
        assert_eq!(client.visits, 6);
    }

    #[test]
    fn test_record_visit_overflow_leaves_client_unchanged() {
        let mut client = juan(i64::MAX - 10);
        assert_eq!(
            client.record_visit(Money::from_cents(100)),
            Err(ValidationError::overflow("totalSpent", i64::MAX))
        );
        assert_eq!(client.total_spent_cents, i64::MAX - 10);
        assert_eq!(client.visits, 5);
    }

    #[test]
    fn test_receive_stops_at_max_stock() {
        let now = Utc::now();
        let mut product = Product {
            id: "3".to_string(),
            name: "Coca Cola".to_string(),
            category: "Bebidas".to_string(),
            price_cents: 200,
            cost_cents: 100,
            stock: MAX_STOCK - 5,
            unit: "botella".to_string(),
            sku: String::new(),
            image: None,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(product.receive(5, 90, now), Ok(MAX_STOCK));
        assert_eq!(product.cost_cents, 90);

        assert!(matches!(
            product.receive(1, 80, now),
            Err(ValidationError::Overflow { .. })
        ));
        assert_eq!(product.stock, MAX_STOCK);
        assert_eq!(product.cost_cents, 90);
    }
}
