//! Invoice and report handlers
//!
//! Files are regenerated on every request and sent back as attachments.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use hz_core::validation::parse_id;

use crate::error::AppResult;
use crate::services::{DocumentService, GeneratedFile};
use crate::AppState;

/// Invoice file plus a signed link to download it.
#[derive(Debug, Serialize)]
pub struct InvoiceLink {
    pub file_name: String,
    pub download_url: String,
}

impl InvoiceLink {
    pub fn new(state: &AppState, file_name: String) -> AppResult<Self> {
        let download_url = state.links.download_url(&file_name)?;
        Ok(Self {
            file_name,
            download_url,
        })
    }
}

/// Regenerate the invoice of an existing sale
pub async fn reissue_invoice(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> AppResult<Json<InvoiceLink>> {
    let sale_id = parse_id("sale_id", &sale_id)?;
    let service = DocumentService::new(state.db.clone(), state.config.clone());
    let (_, file) = service.reissue_invoice(sale_id).await?;
    Ok(Json(InvoiceLink::new(&state, file.file_name)?))
}

/// Stream an invoice named by a signed token
pub async fn download_invoice(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Response> {
    let file_name = state.links.resolve(&token)?;
    let service = DocumentService::new(state.db, state.config);
    let file = service.locate(&file_name);
    let bytes = service.read(&file).await?;
    Ok(attachment(&file, bytes))
}

/// Generate and stream `informe_HZ_movimientos.pdf`
pub async fn movement_report(State(state): State<AppState>) -> AppResult<Response> {
    let service = DocumentService::new(state.db, state.config);
    let file = service.movement_report().await?;
    let bytes = service.read(&file).await?;
    Ok(attachment(&file, bytes))
}

/// Generate and stream `reporte_inv.xlsx`
pub async fn inventory_report(State(state): State<AppState>) -> AppResult<Response> {
    let service = DocumentService::new(state.db, state.config);
    let file = service.inventory_sheet().await?;
    let bytes = service.read(&file).await?;
    Ok(attachment(&file, bytes))
}

fn attachment(file: &GeneratedFile, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type().to_string()),
            (header::CONTENT_DISPOSITION, file.content_disposition()),
        ],
        bytes,
    )
        .into_response()
}
