//! # Services
//!
//! The operations the transport layer calls. Each one validates through
//! `mostrador-core` first, then runs its writes inside a single
//! [`UnitOfWork`](crate::store::UnitOfWork).
//!
//! ```text
//! PosServices
//! ├── orders:    OrderProcessor       create_order
//! ├── purchases: PurchaseProcessor    create_purchase
//! ├── register:  CashRegisterService  open / close / open_or_close / reconcile
//! ├── catalog:   CatalogService       products, categories, clients, suppliers
//! └── readers:   list_orders, list_purchases, list_transactions, ledger_summary
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DbError, PosResult};
use crate::store::{StorageBackend, Store};
use mostrador_core::ledger::LedgerSummary;
use mostrador_core::{ClosedRegisterPolicy, LedgerEntry, Order, Purchase, StockPolicy};

pub mod catalog;
pub mod order;
pub mod purchase;
pub mod register;
pub mod seed;

pub use catalog::CatalogService;
pub use order::OrderProcessor;
pub use purchase::PurchaseProcessor;
pub use register::CashRegisterService;
pub use seed::{seed_demo_data, SeedReport};

/// Business policies chosen at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorPolicy {
    #[serde(default)]
    pub stock: StockPolicy,
    #[serde(default)]
    pub closed_register: ClosedRegisterPolicy,
}

/// All services over one shared store.
#[derive(Clone)]
pub struct PosServices {
    store: Arc<dyn Store>,
    pub orders: OrderProcessor,
    pub purchases: PurchaseProcessor,
    pub register: CashRegisterService,
    pub catalog: CatalogService,
}

impl PosServices {
    pub fn new(store: Arc<dyn Store>, policy: ProcessorPolicy) -> Self {
        PosServices {
            orders: OrderProcessor::new(store.clone(), policy),
            purchases: PurchaseProcessor::new(store.clone()),
            register: CashRegisterService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn backend(&self) -> StorageBackend {
        self.store.backend()
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Newest first.
    pub async fn list_orders(&self) -> PosResult<Vec<Order>> {
        Ok(self.store.list_orders().await?)
    }

    pub async fn get_order(&self, id: &str) -> PosResult<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id).into())
    }

    /// Newest first.
    pub async fn list_purchases(&self) -> PosResult<Vec<Purchase>> {
        Ok(self.store.list_purchases().await?)
    }

    pub async fn get_purchase(&self, id: &str) -> PosResult<Purchase> {
        self.store
            .get_purchase(id)
            .await?
            .ok_or_else(|| DbError::not_found("Purchase", id).into())
    }

    /// Ledger in booking order.
    pub async fn list_transactions(&self) -> PosResult<Vec<LedgerEntry>> {
        Ok(self.store.list_ledger_entries().await?)
    }

    pub async fn ledger_summary(&self) -> PosResult<LedgerSummary> {
        Ok(self.store.ledger_summary().await?)
    }
}
