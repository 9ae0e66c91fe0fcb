//! # Sale Repository
//!
//! Stock-out ledger.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Lifecycle                                  │
//! │                                                                         │
//! │  begin_sale(product, q)                                                │
//! │       │  BEGIN                                                          │
//! │       │  UPDATE products SET stock = stock - q                          │
//! │       │   WHERE id = ? AND stock >= q                                   │
//! │       │                                                                 │
//! │       ├── 0 rows, no product ──────► Err(NotFound)        (rolled back)│
//! │       ├── 0 rows, stock < q ───────► InsufficientStock    (rolled back)│
//! │       │                                                                 │
//! │       │  INSERT INTO sales (...)                                        │
//! │       ▼                                                                 │
//! │  SaleAttempt::Ready(PendingSale)    ◄── transaction still open         │
//! │       │                                                                 │
//! │       │  caller renders the invoice                                    │
//! │       │                                                                 │
//! │       ├── pending.commit()  ──► stock and ledger visible               │
//! │       └── drop(pending)     ──► ROLLBACK, nothing happened             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The decrement and its guard are one statement, so two concurrent sales can
//! never take the same unit: the second one sees the reduced stock.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use super::local_now;
use crate::error::{DbError, DbResult};
use hz_core::types::truncate_to_second;
use hz_core::{MovementEntry, Product, SaleRecord};

/// Outcome of [`SaleRepository::begin_sale`].
#[derive(Debug)]
pub enum SaleAttempt {
    /// Stock was reserved and the sale row written, awaiting commit.
    Ready(PendingSale),

    /// Not enough units on hand; nothing was written.
    InsufficientStock { available: i64 },
}

/// A sale written inside an open transaction.
///
/// Dropping it without calling [`commit`](Self::commit) rolls everything
/// back, including the stock decrement.
#[derive(Debug)]
pub struct PendingSale {
    tx: Transaction<'static, Sqlite>,
    sale: SaleRecord,
    product: Product,
}

impl PendingSale {
    /// The sale row as it will be committed.
    pub fn sale(&self) -> &SaleRecord {
        &self.sale
    }

    /// The product as of this sale (stock already decremented).
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub async fn commit(self) -> DbResult<SaleRecord> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            sale_id = self.sale.id,
            product_id = self.sale.product_id,
            quantity = self.sale.quantity,
            remaining_stock = self.product.stock,
            "Sale committed"
        );
        Ok(self.sale)
    }

    pub async fn rollback(self) -> DbResult<()> {
        warn!(sale_id = self.sale.id, "Rolling back sale");
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Reserves stock and writes the sale row inside a new transaction.
    ///
    /// ## Returns
    /// * `Ok(SaleAttempt::Ready(_))` - Commit it once the invoice exists
    /// * `Ok(SaleAttempt::InsufficientStock { available })` - Nothing written
    /// * `Err(DbError::NotFound)` - Product does not exist, nothing written
    pub async fn begin_sale(&self, product_id: i64, quantity: i64) -> DbResult<SaleAttempt> {
        debug!(product_id, quantity, "Starting sale");

        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock = stock - ?2
            WHERE id = ?1 AND stock >= ?2
            RETURNING id, name, stock, price_cents
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(product) = product else {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return match available {
                None => Err(DbError::not_found("Product", product_id)),
                Some(available) => {
                    debug!(product_id, available, requested = quantity, "Insufficient stock");
                    Ok(SaleAttempt::InsufficientStock { available })
                }
            };
        };

        let sold_at = truncate_to_second(local_now());
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sales (product_id, quantity, sold_at)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(sold_at)
        .fetch_one(&mut *tx)
        .await?;

        debug!(sale_id = id, product_id, "Sale written, awaiting commit");

        Ok(SaleAttempt::Ready(PendingSale {
            tx,
            sale: SaleRecord {
                id,
                product_id,
                quantity,
                sold_at,
            },
            product,
        }))
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<SaleRecord>> {
        let sale = sqlx::query_as::<_, SaleRecord>(
            "SELECT id, product_id, quantity, sold_at FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// All sales joined with their product name, ordered by id.
    ///
    /// Sales of deleted products are included with no name.
    pub async fn list_entries(&self) -> DbResult<Vec<MovementEntry>> {
        let entries = sqlx::query_as::<_, MovementEntry>(
            r#"
            SELECT
                s.id,
                s.product_id,
                p.name AS product_name,
                s.quantity,
                s.sold_at AS recorded_at
            FROM sales s
            LEFT JOIN products p ON p.id = s.product_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
