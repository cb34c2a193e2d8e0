//! Catalog and relationship endpoints: plain keyed get-all / upsert /
//! delete, plus partial product edits.

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};

use super::DeleteResponse;
use crate::error::ApiResult;
use crate::state::AppState;
use mostrador_core::catalog::{
    CategoryInput, ClientInput, ProductInput, ProductPatch, SupplierInput,
};
use mostrador_core::{Category, Client, Product, Supplier};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(save_category))
        .route("/api/categories/{id}", delete(delete_category))
        .route("/api/products", get(list_products).post(save_product))
        .route("/api/products/{id}", delete(delete_product).patch(patch_product))
        .route("/api/clients", get(list_clients).post(save_client))
        .route("/api/clients/{id}", delete(delete_client))
        .route("/api/suppliers", get(list_suppliers).post(save_supplier))
        .route("/api/suppliers/{id}", delete(delete_supplier))
}

// =============================================================================
// Categories
// =============================================================================

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.services.catalog.list_categories().await?))
}

async fn save_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.services.catalog.save_category(input).await?))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    Ok(DeleteResponse::new(state.services.catalog.delete_category(&id).await?))
}

// =============================================================================
// Products
// =============================================================================

async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.services.catalog.list_products().await?))
}

async fn save_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.services.catalog.save_product(input).await?))
}

async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.services.catalog.patch_product(&id, patch).await?))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    Ok(DeleteResponse::new(state.services.catalog.delete_product(&id).await?))
}

// =============================================================================
// Clients
// =============================================================================

async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.services.catalog.list_clients().await?))
}

async fn save_client(
    State(state): State<AppState>,
    Json(input): Json<ClientInput>,
) -> ApiResult<Json<Client>> {
    Ok(Json(state.services.catalog.save_client(input).await?))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    Ok(DeleteResponse::new(state.services.catalog.delete_client(&id).await?))
}

// =============================================================================
// Suppliers
// =============================================================================

async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(state.services.catalog.list_suppliers().await?))
}

async fn save_supplier(
    State(state): State<AppState>,
    Json(input): Json<SupplierInput>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(state.services.catalog.save_supplier(input).await?))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    Ok(DeleteResponse::new(state.services.catalog.delete_supplier(&id).await?))
}
