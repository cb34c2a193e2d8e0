//! # Routes
//!
//! ```text
//! /health                          GET
//! /api/categories[/{id}]           GET POST | DELETE
//! /api/products[/{id}]             GET POST | PATCH DELETE
//! /api/clients[/{id}]              GET POST | DELETE
//! /api/suppliers[/{id}]            GET POST | DELETE
//! /api/orders                      GET POST
//! /api/purchases                   GET POST
//! /api/transactions                GET
//! /api/finance/summary             GET
//! /api/cash-register               GET
//! /api/cash-register/toggle        POST
//! /api/cash-register/reconcile     POST
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use ts_rs::TS;

use crate::state::AppState;

pub mod catalog;
pub mod documents;
pub mod finance;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(documents::router())
        .merge(finance::router())
}

/// Body for deletes.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeleteResponse {
    pub success: bool,
    /// False when nothing had that id.
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(deleted: bool) -> Json<Self> {
        Json(DeleteResponse {
            success: true,
            deleted,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: String,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.services.backend().to_string();
    if state.services.health_check().await {
        (StatusCode::OK, Json(HealthResponse { status: "ok", backend }))
    } else {
        tracing::warn!(%backend, "Storage health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                backend,
            }),
        )
    }
}

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
