//! # Purchase Repository
//!
//! Stock-in ledger. Recording a purchase raises the product's stock and
//! appends one ledger row in a single transaction.

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::local_now;
use crate::error::{DbError, DbResult};
use hz_core::types::truncate_to_minute;
use hz_core::{MovementEntry, PurchaseRecord};

#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Records `quantity` units bought for a product.
    ///
    /// ## Transaction
    /// ```text
    /// BEGIN
    ///   UPDATE products SET stock = stock + q   ── 0 rows? → NotFound, rollback
    ///   INSERT INTO purchases (..., now to the minute)
    /// COMMIT
    /// ```
    ///
    /// The quantity must already be validated as positive; the schema's CHECK
    /// constraint rejects anything else.
    pub async fn record(&self, product_id: i64, quantity: i64) -> DbResult<PurchaseRecord> {
        debug!(product_id, quantity, "Recording purchase");

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE products SET stock = stock + ?2 WHERE id = ?1")
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            // tx dropped here: rolled back
            return Err(DbError::not_found("Product", product_id));
        }

        let purchased_at = truncate_to_minute(local_now());
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO purchases (product_id, quantity, purchased_at)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(purchased_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(purchase_id = id, product_id, quantity, "Purchase recorded");

        Ok(PurchaseRecord {
            id,
            product_id,
            quantity,
            purchased_at,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<PurchaseRecord>> {
        let record = sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, product_id, quantity, purchased_at FROM purchases WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// All purchases joined with their product name, ordered by id.
    ///
    /// Purchases of deleted products are included with no name.
    pub async fn list_entries(&self) -> DbResult<Vec<MovementEntry>> {
        let entries = sqlx::query_as::<_, MovementEntry>(
            r#"
            SELECT
                pu.id,
                pu.product_id,
                p.name AS product_name,
                pu.quantity,
                pu.purchased_at AS recorded_at
            FROM purchases pu
            LEFT JOIN products p ON p.id = pu.product_id
            ORDER BY pu.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use crate::{Database, DbConfig, DbError};
    use hz_core::Money;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_purchase_adds_stock_and_one_record() {
        let db = db().await;
        let product = db
            .products()
            .add_or_merge("Filamento PLA", 3, Money::from_cents(15000))
            .await
            .unwrap();

        let record = db.purchases().record(product.id, 7).await.unwrap();

        let after = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, product.stock + 7);
        assert_eq!(db.purchases().count().await.unwrap(), 1);

        assert_eq!(record.product_id, product.id);
        assert_eq!(record.quantity, 7);
        assert_eq!(record.purchased_at.second(), 0);
        assert_eq!(record.purchased_at.nanosecond(), 0);

        let stored = db.purchases().get_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_purchase_of_unknown_product_writes_nothing() {
        let db = db().await;

        let err = db.purchases().record(404, 5).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(db.purchases().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_entries_keep_deleted_products() {
        let db = db().await;
        let kept = db
            .products()
            .add_or_merge("Gadget", 0, Money::from_cents(500))
            .await
            .unwrap();
        let gone = db
            .products()
            .add_or_merge("Soporte", 0, Money::from_cents(900))
            .await
            .unwrap();

        db.purchases().record(kept.id, 2).await.unwrap();
        db.purchases().record(gone.id, 4).await.unwrap();
        db.purchases().record(kept.id, 1).await.unwrap();
        db.products().delete(gone.id).await.unwrap();

        let entries = db.purchases().list_entries().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(entries[0].product_name.as_deref(), Some("Gadget"));
        assert_eq!(entries[1].product_name, None);
        assert_eq!(entries[1].product_id, gone.id);
        assert_eq!(entries[1].quantity, 4);
    }
}
