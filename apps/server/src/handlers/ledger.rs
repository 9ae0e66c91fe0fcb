//! Purchase and sale handlers

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::Serialize;

use hz_core::{Money, Product, PurchaseRecord, SaleRecord};

use crate::error::AppResult;
use crate::handlers::documents::InvoiceLink;
use crate::services::{InventoryService, MovementInput};
use crate::AppState;

#[derive(Serialize)]
pub struct SaleResponse {
    pub sale: SaleRecord,
    pub product: Product,
    pub total: Money,
    pub invoice: InvoiceLink,
}

/// Record a stock-in
pub async fn record_purchase(
    State(state): State<AppState>,
    Form(input): Form<MovementInput>,
) -> AppResult<(StatusCode, Json<PurchaseRecord>)> {
    let service = InventoryService::new(state.db, state.config);
    let purchase = service.record_purchase(&input).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Record a sale and issue its invoice
pub async fn record_sale(
    State(state): State<AppState>,
    Form(input): Form<MovementInput>,
) -> AppResult<(StatusCode, Json<SaleResponse>)> {
    let service = InventoryService::new(state.db.clone(), state.config.clone());
    let receipt = service.record_sale(&input).await?;

    let invoice = InvoiceLink::new(&state, receipt.invoice.file_name)?;
    Ok((
        StatusCode::CREATED,
        Json(SaleResponse {
            sale: receipt.sale,
            product: receipt.product,
            total: receipt.total,
            invoice,
        }),
    ))
}
