//! Ledger reads and the cash register.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::AppState;
use mostrador_core::ledger::LedgerSummary;
use mostrador_core::register::Reconciliation;
use mostrador_core::{CashRegister, LedgerEntry, Money};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/transactions", get(list_transactions))
        .route("/api/finance/summary", get(summary))
        .route("/api/cash-register", get(current_register))
        .route("/api/cash-register/toggle", post(toggle_register))
        .route("/api/cash-register/reconcile", post(reconcile_register))
}

/// `isOpen: true` opens with `amountCents` as the float; `false` closes with
/// `amountCents` as the counted cash.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToggleRegister {
    pub amount_cents: i64,
    pub is_open: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterToggled {
    pub success: bool,
    pub cash_register: CashRegister,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReconcileRegister {
    pub counted_amount_cents: i64,
}

async fn list_transactions(State(state): State<AppState>) -> ApiResult<Json<Vec<LedgerEntry>>> {
    Ok(Json(state.services.list_transactions().await?))
}

async fn summary(State(state): State<AppState>) -> ApiResult<Json<LedgerSummary>> {
    Ok(Json(state.services.ledger_summary().await?))
}

/// `null` when no session was ever opened.
async fn current_register(State(state): State<AppState>) -> ApiResult<Json<Option<CashRegister>>> {
    Ok(Json(state.services.register.current().await?))
}

async fn toggle_register(
    State(state): State<AppState>,
    Json(request): Json<ToggleRegister>,
) -> ApiResult<Json<RegisterToggled>> {
    let cash_register = state
        .services
        .register
        .open_or_close(Money::from_cents(request.amount_cents), request.is_open)
        .await?;

    Ok(Json(RegisterToggled {
        success: true,
        cash_register,
    }))
}

async fn reconcile_register(
    State(state): State<AppState>,
    Json(request): Json<ReconcileRegister>,
) -> ApiResult<Json<Reconciliation>> {
    let counted = Money::from_cents(request.counted_amount_cents);
    Ok(Json(state.services.register.reconcile(counted).await?))
}
