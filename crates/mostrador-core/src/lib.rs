//! # mostrador-core: Pure Business Logic for Mostrador POS
//!
//! Everything that decides *what* a sale, a purchase or a register close
//! means lives here. Nothing in this crate touches a database or a socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mostrador POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/server)                       │   │
//! │  │    POST /api/orders, POST /api/purchases, register toggle       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 mostrador-db (services + storage)               │   │
//! │  │   OrderProcessor, PurchaseProcessor, CashRegisterService        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ prepare / validate                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ mostrador-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   types  money  order  purchase  register  ledger  policy       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, Order, Purchase, LedgerEntry, ...)
//! - [`money`] - Integer-cent money type
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validators
//! - [`catalog`] - Input structs for catalog and relationship edits
//! - [`order`] - Sale requests and their preparation
//! - [`purchase`] - Purchase requests and their preparation
//! - [`register`] - Cash register state machine and reconciliation
//! - [`ledger`] - Ledger entry builders and summaries
//! - [`policy`] - Configurable stock and closed-register policies
//!
//! ## Example Usage
//!
//! ```rust
//! use mostrador_core::order::{CartLine, NewOrder};
//! use mostrador_core::PaymentMethod;
//!
//! let request = NewOrder {
//!     items: vec![CartLine {
//!         product_id: "1".to_string(),
//!         name: "Hamburguesa Clásica".to_string(),
//!         unit_price_cents: 1250,
//!         quantity: 2,
//!     }],
//!     payment_method: PaymentMethod::Cash,
//!     total_cents: 2500,
//!     client_id: None,
//!     table: None,
//! };
//!
//! let prepared = request.prepare(chrono::Utc::now()).unwrap();
//! assert_eq!(prepared.ledger_entry.amount_cents, 2500);
//! assert_eq!(prepared.ledger_entry.reference_id.as_deref(), Some(prepared.order.id.as_str()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod order;
pub mod policy;
pub mod purchase;
pub mod register;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use policy::{ClosedRegisterPolicy, StockPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single order or purchase.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in a sale.
///
/// ## Business Reason
/// Catches typos at the counter (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum quantity of a single line in a supplier purchase.
///
/// Restocking legitimately moves far larger quantities than a sale.
pub const MAX_PURCHASE_QUANTITY: i64 = 100_000;

/// Ceiling for a single price, cost or cash amount (1,000,000,000.00).
///
/// Keeps every line and document total far inside i64 so running balances
/// only need checked addition.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// Ceiling for units on hand, also enforced when a purchase restocks.
pub const MAX_STOCK: i64 = 1_000_000_000;

/// Ledger category for sale income.
pub const SALE_CATEGORY: &str = "Venta";

/// Ledger category for inventory purchase expenses.
pub const PURCHASE_CATEGORY: &str = "Compra de Inventario";
