//! # Storage Strategy
//!
//! The services see storage only through two traits, so the backend is a
//! startup decision.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Arc<dyn Store>                                                        │
//! │   ├── keyed CRUD: products, categories, clients, suppliers              │
//! │   ├── readers:    orders, purchases, ledger, current register           │
//! │   └── begin() ──► Box<dyn UnitOfWork>                                   │
//! │                   ├── insert_order / insert_purchase                    │
//! │                   ├── decrement_stock / receive_stock                   │
//! │                   ├── record_client_visit                               │
//! │                   ├── append_ledger_entry                               │
//! │                   ├── open_register / credit / insert / close           │
//! │                   └── commit()   (drop without commit = rollback)       │
//! │                                                                         │
//! │   SqliteStore ── sqlx::Transaction                                      │
//! │   MemoryStore ── owned mutex guard + working copy                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};
use mostrador_core::catalog::ProductPatch;
use mostrador_core::ledger::LedgerSummary;
use mostrador_core::register::RegisterClosing;
use mostrador_core::{
    CashRegister, Category, Client, LedgerEntry, Order, Product, Purchase, StockPolicy, Supplier,
    ValidationError,
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

// =============================================================================
// Backend selection
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ValidationError::NotAllowed {
                field: "storage.backend".to_string(),
                allowed: vec!["sqlite".to_string(), "memory".to_string()],
            }),
        }
    }
}

/// Opens the configured backend.
///
/// `db` is only used by the SQLite backend.
pub async fn open_store(backend: StorageBackend, db: DbConfig) -> DbResult<Arc<dyn Store>> {
    match backend {
        StorageBackend::Sqlite => {
            let database = Database::new(db).await?;
            Ok(Arc::new(SqliteStore::new(database)))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

// =============================================================================
// Unit of work results
// =============================================================================

/// Outcome of a stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMovement {
    /// Applied; `stock` is the new level.
    Applied { stock: i64 },
    /// Refused by the `reject` policy; nothing changed.
    Insufficient { available: i64 },
}

// =============================================================================
// Traits
// =============================================================================

/// Persistence collaborator for the services.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    fn backend(&self) -> StorageBackend;

    /// Starts a unit of work. Writes become visible on `commit`.
    async fn begin(&self) -> DbResult<Box<dyn UnitOfWork>>;

    async fn health_check(&self) -> bool;

    // ---- catalog ----------------------------------------------------------

    async fn list_products(&self) -> DbResult<Vec<Product>>;
    async fn get_product(&self, id: &str) -> DbResult<Option<Product>>;
    /// Insert, or overwrite all mutable fields (keeps `created_at`).
    async fn upsert_product(&self, product: Product) -> DbResult<Product>;
    /// Applies an already validated patch. NotFound when the id is unknown.
    async fn patch_product(
        &self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> DbResult<Product>;
    async fn delete_product(&self, id: &str) -> DbResult<bool>;

    async fn list_categories(&self) -> DbResult<Vec<Category>>;
    async fn upsert_category(&self, category: Category) -> DbResult<Category>;
    async fn delete_category(&self, id: &str) -> DbResult<bool>;

    // ---- relationships ----------------------------------------------------

    async fn list_clients(&self) -> DbResult<Vec<Client>>;
    async fn get_client(&self, id: &str) -> DbResult<Option<Client>>;
    /// Insert with the given statistics, or overwrite contact fields only.
    async fn upsert_client(&self, client: Client) -> DbResult<Client>;
    async fn delete_client(&self, id: &str) -> DbResult<bool>;

    async fn list_suppliers(&self) -> DbResult<Vec<Supplier>>;
    async fn get_supplier(&self, id: &str) -> DbResult<Option<Supplier>>;
    async fn upsert_supplier(&self, supplier: Supplier) -> DbResult<Supplier>;
    async fn delete_supplier(&self, id: &str) -> DbResult<bool>;

    // ---- documents and ledger ---------------------------------------------

    /// Newest first.
    async fn list_orders(&self) -> DbResult<Vec<Order>>;
    async fn get_order(&self, id: &str) -> DbResult<Option<Order>>;
    /// Newest first.
    async fn list_purchases(&self) -> DbResult<Vec<Purchase>>;
    async fn get_purchase(&self, id: &str) -> DbResult<Option<Purchase>>;
    /// Booking order.
    async fn list_ledger_entries(&self) -> DbResult<Vec<LedgerEntry>>;
    async fn ledger_summary(&self) -> DbResult<LedgerSummary>;

    /// Most recent register session (open or last closed).
    async fn current_register(&self) -> DbResult<Option<CashRegister>>;
}

/// One storage transaction. Dropping it without `commit` discards every
/// write.
#[async_trait]
pub trait UnitOfWork: Send {
    async fn insert_order(&mut self, order: &Order) -> DbResult<()>;

    async fn decrement_stock(
        &mut self,
        product_id: &str,
        qty: i64,
        policy: StockPolicy,
    ) -> DbResult<StockMovement>;

    /// stock += qty and cost = unit_cost. Returns the new stock.
    async fn receive_stock(
        &mut self,
        product_id: &str,
        qty: i64,
        unit_cost_cents: i64,
    ) -> DbResult<i64>;

    /// total_spent += amount, visits += 1. NotFound for an unknown client.
    async fn record_client_visit(&mut self, client_id: &str, amount_cents: i64) -> DbResult<Client>;

    async fn supplier_exists(&mut self, supplier_id: &str) -> DbResult<bool>;

    async fn insert_purchase(&mut self, purchase: &Purchase) -> DbResult<()>;

    async fn append_ledger_entry(&mut self, entry: &LedgerEntry) -> DbResult<()>;

    async fn open_register(&mut self) -> DbResult<Option<CashRegister>>;

    /// current += amount and expected += amount on the open session.
    async fn credit_open_register(&mut self, amount_cents: i64) -> DbResult<Option<CashRegister>>;

    async fn insert_register(&mut self, register: &CashRegister) -> DbResult<()>;

    async fn close_register(&mut self, closing: &RegisterClosing) -> DbResult<()>;

    async fn commit(self: Box<Self>) -> DbResult<()>;
}
