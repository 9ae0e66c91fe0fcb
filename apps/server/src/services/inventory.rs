//! Inventory operations: catalog maintenance and the purchase/sale ledger.
//!
//! Input arrives as raw form text and is validated here, before any write.
//!
//! ## Sale Flow
//! ```text
//! parse ──► begin_sale (guarded UPDATE + INSERT, tx open)
//!               │
//!               ├── InsufficientStock { available } ──► 409, nothing written
//!               │
//!               ▼
//!         render invoice ──fail──► rollback ──► 500, nothing written
//!               │
//!               ▼
//!            commit ──fail──► remove invoice file ──► 500
//!               │
//!               ▼
//!         SaleReceipt
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hz_core::documents::Invoice;
use hz_core::validation::{parse_id, parse_price, parse_quantity, parse_stock, validate_product_name};
use hz_core::{CoreError, Money, Product, PurchaseRecord, SaleRecord};
use hz_db::{Database, SaleAttempt};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::services::documents::{DocumentService, GeneratedFile};

/// Product form. Fields stay text so malformed numbers become
/// `InvalidInput` instead of extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub price: String,
}

/// Purchase and sale form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementInput {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: String,
}

/// A committed sale and its invoice.
#[derive(Debug, Clone, Serialize)]
pub struct SaleReceipt {
    pub sale: SaleRecord,
    pub product: Product,
    pub total: Money,
    pub invoice: GeneratedFile,
}

pub struct InventoryService {
    db: Database,
    config: Arc<AppConfig>,
}

impl InventoryService {
    pub fn new(db: Database, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Adds a product, or merges stock into the one with the same name and
    /// overwrites its price.
    pub async fn add_or_merge(&self, input: &ProductInput) -> AppResult<Product> {
        let name = validate_product_name(&input.name)?;
        let stock = parse_stock(&input.stock)?;
        let price = parse_price(&input.price)?;

        let product = self.db.products().add_or_merge(&name, stock, price).await?;
        info!(
            product_id = product.id,
            added = stock,
            stock = product.stock,
            price = %product.price(),
            "Product saved"
        );
        Ok(product)
    }

    pub async fn record_purchase(&self, input: &MovementInput) -> AppResult<PurchaseRecord> {
        let product_id = parse_id("product_id", &input.product_id)?;
        let quantity = parse_quantity(&input.quantity)?;

        Ok(self.db.purchases().record(product_id, quantity).await?)
    }

    /// Records a sale and writes its invoice, all or nothing.
    pub async fn record_sale(&self, input: &MovementInput) -> AppResult<SaleReceipt> {
        let product_id = parse_id("product_id", &input.product_id)?;
        let quantity = parse_quantity(&input.quantity)?;

        let pending = match self.db.sales().begin_sale(product_id, quantity).await? {
            SaleAttempt::Ready(pending) => pending,
            SaleAttempt::InsufficientStock { available } => {
                info!(product_id, available, requested = quantity, "Sale refused");
                return Err(CoreError::InsufficientStock {
                    product_id,
                    available,
                    requested: quantity,
                }
                .into());
            }
        };

        let product = pending.product().clone();
        // An error here drops `pending`, which rolls the sale back.
        let invoice = Invoice::new(
            pending.sale().id,
            product.name.clone(),
            product.price(),
            quantity,
            pending.sale().sold_at,
        )?;

        let documents = DocumentService::new(self.db.clone(), self.config.clone());
        let file = match documents.render_invoice(&invoice).await {
            Ok(file) => file,
            Err(err) => {
                if let Err(rollback) = pending.rollback().await {
                    warn!(error = %rollback, "Rollback after failed invoice did not complete");
                }
                return Err(err);
            }
        };

        let sale = match pending.commit().await {
            Ok(sale) => sale,
            Err(err) => {
                if let Err(remove) = tokio::fs::remove_file(&file.path).await {
                    warn!(error = %remove, file = %file.file_name, "Orphan invoice left behind");
                }
                return Err(err.into());
            }
        };

        Ok(SaleReceipt {
            total: invoice.total(),
            sale,
            product,
            invoice: file,
        })
    }

    /// Deletes a product. Unknown ids are a no-op; ledger rows stay.
    pub async fn delete_product(&self, raw_id: &str) -> AppResult<bool> {
        let product_id = parse_id("product_id", raw_id)?;
        Ok(self.db.products().delete(product_id).await?)
    }

    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.db.products().list().await?)
    }
}
