//! # mostrador-db: Storage and Services for Mostrador POS
//!
//! Every write in the system goes through this crate. A sale, a purchase
//! or a register change is one unit of work against one storage backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mostrador POS Data Flow                            │
//! │                                                                         │
//! │  POST /api/orders (apps/server)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  mostrador-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   service/    │    │    store/     │    │ repository/  │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ OrderProc.    │───►│ Store trait   │───►│ ProductRepo  │   │   │
//! │  │   │ PurchaseProc. │    │ UnitOfWork    │    │ OrderRepo    │   │   │
//! │  │   │ CashRegister  │    │ Sqlite/Memory │    │ LedgerRepo   │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite (WAL) at storage.database_path, or process memory      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage and service error types
//! - [`repository`] - SQL per table family
//! - [`store`] - `Store` / `UnitOfWork` traits and both backends
//! - [`service`] - Processors and catalog maintenance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mostrador_db::{open_store, DbConfig, PosServices, ProcessorPolicy, StorageBackend};
//!
//! let store = open_store(StorageBackend::Sqlite, DbConfig::new("mostrador.db")).await?;
//! let services = PosServices::new(store, ProcessorPolicy::default());
//!
//! let order = services.orders.create_order(request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, PosError, PosResult};
pub use pool::{Database, DbConfig};
pub use service::{
    seed_demo_data, CashRegisterService, CatalogService, OrderProcessor, PosServices,
    ProcessorPolicy, PurchaseProcessor, SeedReport,
};
pub use store::{
    open_store, MemoryStore, SqliteStore, StockMovement, StorageBackend, Store, UnitOfWork,
};

// Repository re-exports for convenience
pub use repository::{
    CategoryRepository, ClientRepository, LedgerRepository, OrderRepository, ProductRepository,
    PurchaseRepository, RegisterRepository, SupplierRepository,
};
