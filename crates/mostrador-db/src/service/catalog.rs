//! Catalog and relationship maintenance: products, categories, clients,
//! suppliers. Inputs are validated in `mostrador_core::catalog` before the
//! store sees them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{DbError, PosResult};
use crate::store::Store;
use mostrador_core::catalog::{
    CategoryInput, ClientInput, ProductInput, ProductPatch, SupplierInput,
};
use mostrador_core::{Category, Client, Product, Supplier};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        CatalogService { store }
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn list_products(&self) -> PosResult<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    pub async fn get_product(&self, id: &str) -> PosResult<Product> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id).into())
    }

    /// Create, or overwrite every field of an existing product.
    pub async fn save_product(&self, input: ProductInput) -> PosResult<Product> {
        let product = input.into_product(Utc::now())?;
        let saved = self.store.upsert_product(product).await?;
        info!(product_id = %saved.id, name = %saved.name, "Product saved");
        Ok(saved)
    }

    /// Partial update. An empty patch returns the product unchanged.
    pub async fn patch_product(&self, id: &str, patch: ProductPatch) -> PosResult<Product> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get_product(id).await;
        }

        let updated = self.store.patch_product(id, patch, Utc::now()).await?;
        debug!(product_id = %updated.id, stock = updated.stock, "Product patched");
        Ok(updated)
    }

    /// Past orders and purchases keep their snapshots of the product.
    pub async fn delete_product(&self, id: &str) -> PosResult<bool> {
        let deleted = self.store.delete_product(id).await?;
        debug!(product_id = %id, deleted, "Product delete");
        Ok(deleted)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> PosResult<Vec<Category>> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn save_category(&self, input: CategoryInput) -> PosResult<Category> {
        let category = input.into_category()?;
        Ok(self.store.upsert_category(category).await?)
    }

    /// Products keep their category label.
    pub async fn delete_category(&self, id: &str) -> PosResult<bool> {
        Ok(self.store.delete_category(id).await?)
    }

    // =========================================================================
    // Clients
    // =========================================================================

    pub async fn list_clients(&self) -> PosResult<Vec<Client>> {
        Ok(self.store.list_clients().await?)
    }

    pub async fn get_client(&self, id: &str) -> PosResult<Client> {
        self.store
            .get_client(id)
            .await?
            .ok_or_else(|| DbError::not_found("Client", id).into())
    }

    /// New clients start with no purchases. Saving an existing client never
    /// touches `total_spent` or `visits`.
    pub async fn save_client(&self, input: ClientInput) -> PosResult<Client> {
        let client = input.into_client()?;
        let saved = self.store.upsert_client(client).await?;
        info!(client_id = %saved.id, "Client saved");
        Ok(saved)
    }

    pub async fn delete_client(&self, id: &str) -> PosResult<bool> {
        Ok(self.store.delete_client(id).await?)
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    pub async fn list_suppliers(&self) -> PosResult<Vec<Supplier>> {
        Ok(self.store.list_suppliers().await?)
    }

    pub async fn get_supplier(&self, id: &str) -> PosResult<Supplier> {
        self.store
            .get_supplier(id)
            .await?
            .ok_or_else(|| DbError::not_found("Supplier", id).into())
    }

    pub async fn save_supplier(&self, input: SupplierInput) -> PosResult<Supplier> {
        let supplier = input.into_supplier()?;
        let saved = self.store.upsert_supplier(supplier).await?;
        info!(supplier_id = %saved.id, "Supplier saved");
        Ok(saved)
    }

    pub async fn delete_supplier(&self, id: &str) -> PosResult<bool> {
        Ok(self.store.delete_supplier(id).await?)
    }
}
