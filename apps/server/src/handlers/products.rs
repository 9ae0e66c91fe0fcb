//! Catalog handlers

use axum::{
    extract::{Path, State},
    Form, Json,
};
use serde::Serialize;

use hz_core::Product;

use crate::error::AppResult;
use crate::services::{InventoryService, ProductInput};
use crate::AppState;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub product_id: String,
    pub deleted: bool,
}

/// List the catalog ordered by id
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = InventoryService::new(state.db, state.config);
    Ok(Json(service.list_products().await?))
}

/// Add a product or merge it into the one with the same name
pub async fn add_product(
    State(state): State<AppState>,
    Form(input): Form<ProductInput>,
) -> AppResult<Json<Product>> {
    let service = InventoryService::new(state.db, state.config);
    Ok(Json(service.add_or_merge(&input).await?))
}

/// Delete a product; unknown ids succeed with `deleted: false`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let service = InventoryService::new(state.db, state.config);
    let deleted = service.delete_product(&id).await?;
    Ok(Json(DeleteResponse {
        product_id: id,
        deleted,
    }))
}
