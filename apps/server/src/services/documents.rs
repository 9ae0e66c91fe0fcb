//! Document service: invoices, movement report and inventory spreadsheet.
//!
//! Layout happens in hz-core on the async side; encoding and the file write
//! run on the blocking pool through [`hz_render::replace_atomically`], so a
//! report that is regenerated while being downloaded is never seen half
//! written.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use hz_core::documents::{
    build_inventory_sheet, build_invoice, build_movement_report, Invoice, MovementReport,
    INVENTORY_FILE_NAME, MOVEMENT_REPORT_FILE_NAME,
};
use hz_core::CoreError;
use hz_db::Database;
use hz_render::{replace_atomically, save_pdf, save_xlsx, RenderResult};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A file written to the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl GeneratedFile {
    pub fn content_type(&self) -> &'static str {
        if self.file_name.ends_with(".xlsx") {
            XLSX_CONTENT_TYPE
        } else {
            PDF_CONTENT_TYPE
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

pub struct DocumentService {
    db: Database,
    config: Arc<AppConfig>,
}

impl DocumentService {
    pub fn new(db: Database, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Where `file_name` lives in the output directory.
    pub fn locate(&self, file_name: &str) -> GeneratedFile {
        GeneratedFile {
            file_name: file_name.to_string(),
            path: self.config.output_dir.join(file_name),
        }
    }

    /// Lays out and writes the invoice PDF.
    pub async fn render_invoice(&self, invoice: &Invoice) -> AppResult<GeneratedFile> {
        let file = self.locate(&invoice.file_name());
        let document = build_invoice(invoice, &self.config.business_name);

        self.write_blocking(file.path.clone(), move |tmp| save_pdf(&document, tmp))
            .await?;

        info!(sale_id = invoice.sale_id, file = %file.file_name, "Invoice written");
        Ok(file)
    }

    /// Rebuilds the invoice of an existing sale from the ledger.
    ///
    /// The unit price is the product's current price. A sale whose product
    /// has since been deleted cannot be invoiced again.
    pub async fn reissue_invoice(&self, sale_id: i64) -> AppResult<(Invoice, GeneratedFile)> {
        let sale = self
            .db
            .sales()
            .get_by_id(sale_id)
            .await?
            .ok_or(CoreError::SaleNotFound(sale_id))?;

        let product = self
            .db
            .products()
            .get_by_id(sale.product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(sale.product_id))?;

        let invoice = Invoice::new(
            sale.id,
            product.name.clone(),
            product.price(),
            sale.quantity,
            sale.sold_at,
        )?;
        let file = self.render_invoice(&invoice).await?;
        Ok((invoice, file))
    }

    /// Writes `informe_HZ_movimientos.pdf` from the full ledger.
    pub async fn movement_report(&self) -> AppResult<GeneratedFile> {
        let report = MovementReport {
            business_name: self.config.business_name.clone(),
            generated_on: Local::now().date_naive(),
            purchases: self.db.purchases().list_entries().await?,
            sales: self.db.sales().list_entries().await?,
        };
        let (purchases, sales) = (report.purchases.len(), report.sales.len());

        let document = build_movement_report(&report);
        let pages = document.pages.len();
        let file = self.locate(MOVEMENT_REPORT_FILE_NAME);

        self.write_blocking(file.path.clone(), move |tmp| save_pdf(&document, tmp))
            .await?;

        info!(purchases, sales, pages, "Movement report written");
        Ok(file)
    }

    /// Writes `reporte_inv.xlsx` from the current catalog.
    pub async fn inventory_sheet(&self) -> AppResult<GeneratedFile> {
        let products = self.db.products().list().await?;
        let sheet = build_inventory_sheet(&products, &self.config.business_name);
        let file = self.locate(INVENTORY_FILE_NAME);

        self.write_blocking(file.path.clone(), move |tmp| save_xlsx(&sheet, tmp))
            .await?;

        info!(products = products.len(), "Inventory spreadsheet written");
        Ok(file)
    }

    /// Reads a generated file back for download.
    pub async fn read(&self, file: &GeneratedFile) -> AppResult<Vec<u8>> {
        tokio::fs::read(&file.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::NotFound(format!("File {}", file.file_name)),
            _ => AppError::StorageFailure(format!("Failed to read {}: {e}", file.file_name)),
        })
    }

    async fn write_blocking<F>(&self, target: PathBuf, write: F) -> AppResult<()>
    where
        F: FnOnce(&Path) -> RenderResult<()> + Send + 'static,
    {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| {
                AppError::DocumentGenerationFailure(format!(
                    "Cannot create {}: {e}",
                    self.config.output_dir.display()
                ))
            })?;

        debug!(target = %target.display(), "Rendering on blocking pool");
        tokio::task::spawn_blocking(move || replace_atomically(&target, write))
            .await
            .map_err(|e| AppError::DocumentGenerationFailure(format!("Render task failed: {e}")))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use hz_core::Money;
    use hz_db::SaleAttempt;

    fn service(state: &crate::AppState) -> DocumentService {
        DocumentService::new(state.db.clone(), state.config.clone())
    }

    #[tokio::test]
    async fn test_inventory_sheet_written() {
        let (state, _dir) = test_state().await;
        state
            .db
            .products()
            .add_or_merge("Gadget", 15, Money::from_cents(600))
            .await
            .unwrap();

        let file = service(&state).inventory_sheet().await.unwrap();
        assert_eq!(file.file_name, "reporte_inv.xlsx");
        assert_eq!(file.content_type(), XLSX_CONTENT_TYPE);

        let bytes = service(&state).read(&file).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_movement_report_regenerates_in_place() {
        let (state, _dir) = test_state().await;
        let product = state
            .db
            .products()
            .add_or_merge("Gadget", 0, Money::from_cents(600))
            .await
            .unwrap();
        state.db.purchases().record(product.id, 4).await.unwrap();

        let docs = service(&state);
        let first = docs.movement_report().await.unwrap();
        let second = docs.movement_report().await.unwrap();
        assert_eq!(first.path, second.path);

        let entries: Vec<_> = std::fs::read_dir(&state.config.output_dir)
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(docs.read(&second).await.unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_reissue_invoice() {
        let (state, _dir) = test_state().await;
        let product = state
            .db
            .products()
            .add_or_merge("Gadget", 5, Money::from_cents(600))
            .await
            .unwrap();
        let sale = match state.db.sales().begin_sale(product.id, 2).await.unwrap() {
            SaleAttempt::Ready(pending) => pending.commit().await.unwrap(),
            other => panic!("unexpected {other:?}"),
        };

        let (invoice, file) = service(&state).reissue_invoice(sale.id).await.unwrap();
        assert_eq!(invoice.total(), Money::from_cents(1200));
        assert_eq!(file.file_name, invoice.file_name());
        assert!(file.path.exists());
    }

    #[tokio::test]
    async fn test_reissue_after_product_deleted() {
        let (state, _dir) = test_state().await;
        let product = state
            .db
            .products()
            .add_or_merge("Gadget", 5, Money::from_cents(600))
            .await
            .unwrap();
        let sale = match state.db.sales().begin_sale(product.id, 1).await.unwrap() {
            SaleAttempt::Ready(pending) => pending.commit().await.unwrap(),
            other => panic!("unexpected {other:?}"),
        };
        state.db.products().delete(product.id).await.unwrap();

        let result = service(&state).reissue_invoice(sale.id).await;
        let expected = format!("Product {}", product.id);
        assert!(matches!(result, Err(AppError::NotFound(ref what)) if *what == expected));
    }

    #[tokio::test]
    async fn test_reissue_unknown_sale() {
        let (state, _dir) = test_state().await;
        let result = service(&state).reissue_invoice(404).await;
        assert!(matches!(result, Err(AppError::NotFound(ref what)) if what == "Sale 404"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let (state, _dir) = test_state().await;
        let docs = service(&state);
        let file = docs.locate("Factura_000099_2024-01-01_00-00-00.pdf");
        assert!(matches!(docs.read(&file).await, Err(AppError::NotFound(_))));
    }
}
