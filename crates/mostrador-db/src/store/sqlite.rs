//! SQLite backend: repositories for reads, one `sqlx::Transaction` per
//! unit of work.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use super::{StockMovement, Store, StorageBackend, UnitOfWork};
use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{client, ledger, order, product, purchase, register, supplier};
use mostrador_core::catalog::ProductPatch;
use mostrador_core::ledger::LedgerSummary;
use mostrador_core::register::RegisterClosing;
use mostrador_core::{
    CashRegister, Category, Client, LedgerEntry, Order, Product, Purchase, StockPolicy, Supplier,
};

#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        SqliteStore { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Sqlite
    }

    async fn begin(&self) -> DbResult<Box<dyn UnitOfWork>> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Take the write lock up front. A deferred transaction that reads
        // first and writes later can fail with SQLITE_BUSY instead of waiting.
        sqlx::query("UPDATE cash_registers SET is_open = is_open WHERE 0")
            .execute(&mut *tx)
            .await?;

        debug!("Unit of work started");
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }

    async fn health_check(&self) -> bool {
        self.db.health_check().await
    }

    async fn list_products(&self) -> DbResult<Vec<Product>> {
        self.db.products().list().await
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        self.db.products().get_by_id(id).await
    }

    async fn upsert_product(&self, product: Product) -> DbResult<Product> {
        self.db.products().upsert(&product).await
    }

    async fn patch_product(
        &self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> DbResult<Product> {
        self.db.products().patch(id, &patch, now).await
    }

    async fn delete_product(&self, id: &str) -> DbResult<bool> {
        self.db.products().delete(id).await
    }

    async fn list_categories(&self) -> DbResult<Vec<Category>> {
        self.db.categories().list().await
    }

    async fn upsert_category(&self, category: Category) -> DbResult<Category> {
        self.db.categories().upsert(&category).await
    }

    async fn delete_category(&self, id: &str) -> DbResult<bool> {
        self.db.categories().delete(id).await
    }

    async fn list_clients(&self) -> DbResult<Vec<Client>> {
        self.db.clients().list().await
    }

    async fn get_client(&self, id: &str) -> DbResult<Option<Client>> {
        self.db.clients().get_by_id(id).await
    }

    async fn upsert_client(&self, client: Client) -> DbResult<Client> {
        self.db.clients().upsert(&client).await
    }

    async fn delete_client(&self, id: &str) -> DbResult<bool> {
        self.db.clients().delete(id).await
    }

    async fn list_suppliers(&self) -> DbResult<Vec<Supplier>> {
        self.db.suppliers().list().await
    }

    async fn get_supplier(&self, id: &str) -> DbResult<Option<Supplier>> {
        self.db.suppliers().get_by_id(id).await
    }

    async fn upsert_supplier(&self, supplier: Supplier) -> DbResult<Supplier> {
        self.db.suppliers().upsert(&supplier).await
    }

    async fn delete_supplier(&self, id: &str) -> DbResult<bool> {
        self.db.suppliers().delete(id).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        self.db.orders().list().await
    }

    async fn get_order(&self, id: &str) -> DbResult<Option<Order>> {
        self.db.orders().get_by_id(id).await
    }

    async fn list_purchases(&self) -> DbResult<Vec<Purchase>> {
        self.db.purchases().list().await
    }

    async fn get_purchase(&self, id: &str) -> DbResult<Option<Purchase>> {
        self.db.purchases().get_by_id(id).await
    }

    async fn list_ledger_entries(&self) -> DbResult<Vec<LedgerEntry>> {
        self.db.ledger().list().await
    }

    async fn ledger_summary(&self) -> DbResult<LedgerSummary> {
        self.db.ledger().summary().await
    }

    async fn current_register(&self) -> DbResult<Option<CashRegister>> {
        self.db.registers().latest().await
    }
}

// =============================================================================
// Unit of work
// =============================================================================

/// Wraps a pool transaction. sqlx rolls it back when dropped uncommitted.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn insert_order(&mut self, order: &Order) -> DbResult<()> {
        order::insert(&mut *self.tx, order).await
    }

    async fn decrement_stock(
        &mut self,
        product_id: &str,
        qty: i64,
        policy: StockPolicy,
    ) -> DbResult<StockMovement> {
        product::decrement_stock(&mut *self.tx, product_id, qty, policy).await
    }

    async fn receive_stock(
        &mut self,
        product_id: &str,
        qty: i64,
        unit_cost_cents: i64,
    ) -> DbResult<i64> {
        product::receive_stock(&mut *self.tx, product_id, qty, unit_cost_cents).await
    }

    async fn record_client_visit(
        &mut self,
        client_id: &str,
        amount_cents: i64,
    ) -> DbResult<Client> {
        client::record_visit(&mut *self.tx, client_id, amount_cents).await
    }

    async fn supplier_exists(&mut self, supplier_id: &str) -> DbResult<bool> {
        supplier::exists(&mut *self.tx, supplier_id).await
    }

    async fn insert_purchase(&mut self, purchase: &Purchase) -> DbResult<()> {
        purchase::insert(&mut *self.tx, purchase).await
    }

    async fn append_ledger_entry(&mut self, entry: &LedgerEntry) -> DbResult<()> {
        ledger::append(&mut *self.tx, entry).await
    }

    async fn open_register(&mut self) -> DbResult<Option<CashRegister>> {
        register::find_open(&mut *self.tx).await
    }

    async fn credit_open_register(&mut self, amount_cents: i64) -> DbResult<Option<CashRegister>> {
        register::credit_open(&mut *self.tx, amount_cents).await
    }

    async fn insert_register(&mut self, cash_register: &CashRegister) -> DbResult<()> {
        register::insert(&mut *self.tx, cash_register).await
    }

    async fn close_register(&mut self, closing: &RegisterClosing) -> DbResult<()> {
        register::close(&mut *self.tx, closing).await
    }

    async fn commit(self: Box<Self>) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Unit of work committed");
        Ok(())
    }
}
