//! Orders and purchases.
//!
//! ## Checkout
//! ```text
//! POST /api/orders
//! { "items": [{ "productId": "1", "name": "Hamburguesa Clásica",
//!               "unitPriceCents": 1250, "quantity": 2 }],
//!   "paymentMethod": "cash", "totalCents": 2500, "clientId": null }
//!      │
//!      ▼
//! OrderProcessor::create_order  (one unit of work)
//!      │
//!      ▼
//! { "success": true, "orderId": "9b1d..." }
//! ```

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::AppState;
use mostrador_core::order::NewOrder;
use mostrador_core::purchase::NewPurchase;
use mostrador_core::{Order, Purchase};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/purchases", get(list_purchases).post(create_purchase))
        .route("/api/purchases/{id}", get(get_purchase))
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderCreated {
    pub success: bool,
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseCreated {
    pub success: bool,
    pub purchase_id: String,
}

async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.services.list_orders().await?))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.services.get_order(&id).await?))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<NewOrder>,
) -> ApiResult<Json<OrderCreated>> {
    debug!(lines = request.items.len(), total_cents = request.total_cents, "Checkout received");
    let order = state.services.orders.create_order(request).await?;

    Ok(Json(OrderCreated {
        success: true,
        order_id: order.id,
    }))
}

async fn list_purchases(State(state): State<AppState>) -> ApiResult<Json<Vec<Purchase>>> {
    Ok(Json(state.services.list_purchases().await?))
}

async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Purchase>> {
    Ok(Json(state.services.get_purchase(&id).await?))
}

async fn create_purchase(
    State(state): State<AppState>,
    Json(request): Json<NewPurchase>,
) -> ApiResult<Json<PurchaseCreated>> {
    let purchase = state.services.purchases.create_purchase(request).await?;

    Ok(Json(PurchaseCreated {
        success: true,
        purchase_id: purchase.id,
    }))
}
