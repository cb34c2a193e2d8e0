//! In-memory backend.
//!
//! ```text
//! MemoryStore { state: Arc<Mutex<MemoryState>> }
//!
//! begin()  ── lock_owned() ──► guard   (other writers and readers wait)
//!          ── guard.clone()  ─► work   (all writes go here)
//! commit() ── *guard = work            (publish)
//! drop     ── work discarded           (rollback)
//! ```
//!
//! Holding the guard for the whole unit of work serialises writers, which
//! gives the same "one open register" and "no lost stock update"
//! guarantees the SQLite backend gets from its constraints.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use super::{StockMovement, Store, StorageBackend, UnitOfWork};
use crate::error::{DbError, DbResult};
use mostrador_core::catalog::ProductPatch;
use mostrador_core::ledger::LedgerSummary;
use mostrador_core::register::RegisterClosing;
use mostrador_core::{
    CashRegister, Category, Client, LedgerEntry, Money, Order, Product, Purchase, StockPolicy,
    Supplier,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    products: BTreeMap<String, Product>,
    categories: BTreeMap<String, Category>,
    clients: BTreeMap<String, Client>,
    suppliers: BTreeMap<String, Supplier>,
    /// Insertion order.
    orders: Vec<Order>,
    purchases: Vec<Purchase>,
    ledger: Vec<LedgerEntry>,
    registers: Vec<CashRegister>,
}

fn sorted_by_name<T: Clone>(map: &BTreeMap<String, T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut values: Vec<T> = map.values().cloned().collect();
    values.sort_by(|a, b| name(a).cmp(name(b)));
    values
}

/// Newest first; ties keep reverse insertion order.
fn newest_first<T: Clone>(items: &[T], date: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut items: Vec<T> = items.iter().rev().cloned().collect();
    items.sort_by(|a, b| date(b).cmp(&date(a)));
    items
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn begin(&self) -> DbResult<Box<dyn UnitOfWork>> {
        let guard = self.state.clone().lock_owned().await;
        let work = (*guard).clone();
        debug!("Unit of work started");
        Ok(Box::new(MemoryUnitOfWork { guard, work }))
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn list_products(&self) -> DbResult<Vec<Product>> {
        let state = self.state.lock().await;
        Ok(sorted_by_name(&state.products, |p| p.name.as_str()))
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        Ok(self.state.lock().await.products.get(id).cloned())
    }

    async fn upsert_product(&self, mut product: Product) -> DbResult<Product> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.products.get(&product.id) {
            product.created_at = existing.created_at;
        }
        state.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn patch_product(
        &self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> DbResult<Product> {
        let mut state = self.state.lock().await;
        let product = state
            .products
            .get_mut(id)
            .ok_or_else(|| DbError::not_found("Product", id))?;

        // Validated by the caller; a failure here still leaves the row alone
        let mut updated = product.clone();
        patch
            .apply_to(&mut updated, now)
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;
        *product = updated.clone();
        Ok(updated)
    }

    async fn delete_product(&self, id: &str) -> DbResult<bool> {
        Ok(self.state.lock().await.products.remove(id).is_some())
    }

    async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(sorted_by_name(&state.categories, |c| c.name.as_str()))
    }

    async fn upsert_category(&self, category: Category) -> DbResult<Category> {
        let mut state = self.state.lock().await;
        state.categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> DbResult<bool> {
        Ok(self.state.lock().await.categories.remove(id).is_some())
    }

    async fn list_clients(&self) -> DbResult<Vec<Client>> {
        let state = self.state.lock().await;
        Ok(sorted_by_name(&state.clients, |c| c.name.as_str()))
    }

    async fn get_client(&self, id: &str) -> DbResult<Option<Client>> {
        Ok(self.state.lock().await.clients.get(id).cloned())
    }

    async fn upsert_client(&self, client: Client) -> DbResult<Client> {
        let mut state = self.state.lock().await;
        let stored = match state.clients.get(&client.id) {
            Some(existing) => Client {
                total_spent_cents: existing.total_spent_cents,
                visits: existing.visits,
                ..client
            },
            None => client,
        };
        state.clients.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_client(&self, id: &str) -> DbResult<bool> {
        Ok(self.state.lock().await.clients.remove(id).is_some())
    }

    async fn list_suppliers(&self) -> DbResult<Vec<Supplier>> {
        let state = self.state.lock().await;
        Ok(sorted_by_name(&state.suppliers, |s| s.name.as_str()))
    }

    async fn get_supplier(&self, id: &str) -> DbResult<Option<Supplier>> {
        Ok(self.state.lock().await.suppliers.get(id).cloned())
    }

    async fn upsert_supplier(&self, supplier: Supplier) -> DbResult<Supplier> {
        let mut state = self.state.lock().await;
        state.suppliers.insert(supplier.id.clone(), supplier.clone());
        Ok(supplier)
    }

    async fn delete_supplier(&self, id: &str) -> DbResult<bool> {
        Ok(self.state.lock().await.suppliers.remove(id).is_some())
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        let state = self.state.lock().await;
        Ok(newest_first(&state.orders, |o| o.date))
    }

    async fn get_order(&self, id: &str) -> DbResult<Option<Order>> {
        let state = self.state.lock().await;
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_purchases(&self) -> DbResult<Vec<Purchase>> {
        let state = self.state.lock().await;
        Ok(newest_first(&state.purchases, |p| p.date))
    }

    async fn get_purchase(&self, id: &str) -> DbResult<Option<Purchase>> {
        let state = self.state.lock().await;
        Ok(state.purchases.iter().find(|p| p.id == id).cloned())
    }

    async fn list_ledger_entries(&self) -> DbResult<Vec<LedgerEntry>> {
        let state = self.state.lock().await;
        let mut entries = state.ledger.clone();
        // Stable sort keeps booking order for equal dates
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn ledger_summary(&self) -> DbResult<LedgerSummary> {
        let state = self.state.lock().await;
        Ok(LedgerSummary::from_entries(&state.ledger))
    }

    async fn current_register(&self) -> DbResult<Option<CashRegister>> {
        let state = self.state.lock().await;
        Ok(state.registers.last().cloned())
    }
}

// =============================================================================
// Unit of work
// =============================================================================

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    work: MemoryState,
}

impl MemoryUnitOfWork {
    fn open_register_mut(&mut self) -> Option<&mut CashRegister> {
        self.work.registers.iter_mut().find(|r| r.is_open)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn insert_order(&mut self, order: &Order) -> DbResult<()> {
        if self.work.orders.iter().any(|o| o.id == order.id) {
            return Err(DbError::duplicate("orders.id", &order.id));
        }
        self.work.orders.push(order.clone());
        Ok(())
    }

    async fn decrement_stock(
        &mut self,
        product_id: &str,
        qty: i64,
        policy: StockPolicy,
    ) -> DbResult<StockMovement> {
        let product = self
            .work
            .products
            .get_mut(product_id)
            .ok_or_else(|| DbError::not_found("Product", product_id))?;

        match policy.apply(product.stock, qty) {
            Ok(stock) => {
                product.stock = stock;
                product.updated_at = Utc::now();
                Ok(StockMovement::Applied { stock })
            }
            Err(available) => Ok(StockMovement::Insufficient { available }),
        }
    }

    async fn receive_stock(
        &mut self,
        product_id: &str,
        qty: i64,
        unit_cost_cents: i64,
    ) -> DbResult<i64> {
        let product = self
            .work
            .products
            .get_mut(product_id)
            .ok_or_else(|| DbError::not_found("Product", product_id))?;

        Ok(product.receive(qty, unit_cost_cents, Utc::now())?)
    }

    async fn record_client_visit(
        &mut self,
        client_id: &str,
        amount_cents: i64,
    ) -> DbResult<Client> {
        let client = self
            .work
            .clients
            .get_mut(client_id)
            .ok_or_else(|| DbError::not_found("Client", client_id))?;

        client.record_visit(Money::from_cents(amount_cents))?;
        Ok(client.clone())
    }

    async fn supplier_exists(&mut self, supplier_id: &str) -> DbResult<bool> {
        Ok(self.work.suppliers.contains_key(supplier_id))
    }

    async fn insert_purchase(&mut self, purchase: &Purchase) -> DbResult<()> {
        if self.work.purchases.iter().any(|p| p.id == purchase.id) {
            return Err(DbError::duplicate("purchases.id", &purchase.id));
        }
        self.work.purchases.push(purchase.clone());
        Ok(())
    }

    async fn append_ledger_entry(&mut self, entry: &LedgerEntry) -> DbResult<()> {
        self.work.ledger.push(entry.clone());
        Ok(())
    }

    async fn open_register(&mut self) -> DbResult<Option<CashRegister>> {
        Ok(self.open_register_mut().cloned())
    }

    async fn credit_open_register(&mut self, amount_cents: i64) -> DbResult<Option<CashRegister>> {
        match self.open_register_mut() {
            Some(register) => {
                register.credit(Money::from_cents(amount_cents))?;
                Ok(Some(register.clone()))
            }
            None => Ok(None),
        }
    }

    async fn insert_register(&mut self, register: &CashRegister) -> DbResult<()> {
        if register.is_open && self.work.registers.iter().any(|r| r.is_open) {
            return Err(DbError::duplicate("cash_registers.is_open", "1"));
        }
        self.work.registers.push(register.clone());
        Ok(())
    }

    async fn close_register(&mut self, closing: &RegisterClosing) -> DbResult<()> {
        let register = self
            .work
            .registers
            .iter_mut()
            .find(|r| r.id == closing.register_id && r.is_open)
            .ok_or_else(|| DbError::not_found("Open cash register", &closing.register_id))?;

        register.apply_closing(closing);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DbResult<()> {
        let MemoryUnitOfWork { mut guard, work } = *self;
        *guard = work;
        debug!("Unit of work committed");
        Ok(())
    }
}
