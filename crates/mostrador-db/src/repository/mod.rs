//! # Repository Module
//!
//! SQL for the SQLite backend, one repository per table family.
//!
//! ## Two Entry Points Per Repository
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Repository struct (holds the pool)                                     │
//! │  ├── reads and plain keyed writes                                       │
//! │  └── used by SqliteStore for catalog calls and listings                 │
//! │                                                                         │
//! │  pub(crate) fns taking &mut SqliteConnection                            │
//! │  ├── writes that must share a transaction                               │
//! │  └── used by SqliteUnitOfWork (orders, purchases, register)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - products and stock movements
//! - [`CategoryRepository`] - categories
//! - [`ClientRepository`] - clients and their statistics
//! - [`SupplierRepository`] - suppliers
//! - [`OrderRepository`] - recorded sales
//! - [`PurchaseRepository`] - recorded purchases
//! - [`LedgerRepository`] - ledger entries and summary
//! - [`RegisterRepository`] - cash register sessions

pub mod category;
pub mod client;
pub mod ledger;
pub mod order;
pub mod product;
pub mod purchase;
pub mod register;
pub mod supplier;

pub use category::CategoryRepository;
pub use client::ClientRepository;
pub use ledger::LedgerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use purchase::PurchaseRepository;
pub use register::RegisterRepository;
pub use supplier::SupplierRepository;
