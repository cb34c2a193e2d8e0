//! # Purchase Processor
//!
//! Records a supplier purchase: stock up, cost overwritten with the price
//! just paid, one EXPENSE entry. All in one unit of work.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{DbError, PosResult};
use crate::store::Store;
use mostrador_core::purchase::NewPurchase;
use mostrador_core::Purchase;

#[derive(Clone)]
pub struct PurchaseProcessor {
    store: Arc<dyn Store>,
}

impl PurchaseProcessor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        PurchaseProcessor { store }
    }

    pub async fn create_purchase(&self, request: NewPurchase) -> PosResult<Purchase> {
        let prepared = request.prepare(Utc::now())?;
        let purchase = &prepared.purchase;

        let mut uow = self.store.begin().await?;

        if !uow.supplier_exists(&purchase.supplier_id).await? {
            return Err(DbError::not_found("Supplier", &purchase.supplier_id).into());
        }

        uow.insert_purchase(purchase).await?;

        for line in &purchase.items {
            let stock = uow
                .receive_stock(&line.product_id, line.quantity, line.unit_cost_cents)
                .await?;
            debug!(product_id = %line.product_id, stock, "Product restocked");
        }

        uow.append_ledger_entry(&prepared.ledger_entry).await?;
        uow.commit().await?;

        info!(
            purchase_id = %purchase.id,
            supplier = %purchase.supplier_name,
            total_cents = purchase.total_cents,
            "Purchase recorded"
        );
        Ok(prepared.purchase)
    }
}
