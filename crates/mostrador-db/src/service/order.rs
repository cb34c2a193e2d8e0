//! # Order Processor
//!
//! Records a sale and everything that depends on it as one unit of work.
//!
//! ## Steps (single transaction)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewOrder ── prepare() ──► rejected here: nothing touched               │
//! │       │                                                                 │
//! │       ▼  begin()                                                        │
//! │  1. insert order + lines                                                │
//! │  2. per line: stock -= qty  (StockPolicy)                               │
//! │  3. client: total_spent += total, visits += 1                           │
//! │  4. ledger: INCOME "Venta"                                              │
//! │  5. cash only: register current/expected += total                       │
//! │       │                          (ClosedRegisterPolicy if none open)    │
//! │       ▼  commit()                                                       │
//! │  Any `?` before commit drops the unit of work: full rollback.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::ProcessorPolicy;
use crate::error::PosResult;
use crate::store::{StockMovement, Store};
use mostrador_core::order::NewOrder;
use mostrador_core::{ClosedRegisterPolicy, CoreError, Order};

#[derive(Clone)]
pub struct OrderProcessor {
    store: Arc<dyn Store>,
    policy: ProcessorPolicy,
}

impl OrderProcessor {
    pub fn new(store: Arc<dyn Store>, policy: ProcessorPolicy) -> Self {
        OrderProcessor { store, policy }
    }

    pub async fn create_order(&self, request: NewOrder) -> PosResult<Order> {
        let prepared = request.prepare(Utc::now())?;
        let order = &prepared.order;

        debug!(
            order_id = %order.id,
            lines = order.items.len(),
            total_cents = order.total_cents,
            payment_method = ?order.payment_method,
            "Recording order"
        );

        let mut uow = self.store.begin().await?;

        uow.insert_order(order).await?;

        for line in &order.items {
            let movement = uow
                .decrement_stock(&line.product_id, line.quantity, self.policy.stock)
                .await?;

            if let StockMovement::Insufficient { available } = movement {
                warn!(
                    order_id = %order.id,
                    product_id = %line.product_id,
                    available,
                    requested = line.quantity,
                    "Order rejected: insufficient stock"
                );
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id.clone(),
                    available,
                    requested: line.quantity,
                }
                .into());
            }
        }

        if let Some(client_id) = &order.client_id {
            let client = uow.record_client_visit(client_id, order.total_cents).await?;
            debug!(client_id = %client.id, visits = client.visits, "Client stats updated");
        }

        uow.append_ledger_entry(&prepared.ledger_entry).await?;

        if let Some(cash) = prepared.cash_amount() {
            match uow.credit_open_register(cash.cents()).await? {
                Some(register) => debug!(
                    register_id = %register.id,
                    expected_amount_cents = register.expected_amount_cents,
                    "Register credited"
                ),
                None => match self.policy.closed_register {
                    ClosedRegisterPolicy::Reject => return Err(CoreError::RegisterClosed.into()),
                    ClosedRegisterPolicy::Ignore => warn!(
                        order_id = %order.id,
                        total_cents = order.total_cents,
                        "Cash order recorded with no open register"
                    ),
                },
            }
        }

        uow.commit().await?;

        info!(
            order_id = %order.id,
            total_cents = order.total_cents,
            "Order recorded"
        );
        Ok(prepared.order)
    }
}
