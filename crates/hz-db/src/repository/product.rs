//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Add-or-Merge
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a product entry is stored                        │
//! │                                                                         │
//! │  add_or_merge("Gadget", 5, Q 6.00)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT ... ON CONFLICT(name) DO UPDATE      (one statement)           │
//! │       │                                                                 │
//! │       ├── no "Gadget" yet:  new row (stock 5, price 6.00)              │
//! │       │                                                                 │
//! │       └── "Gadget" exists:  stock = stock + 5                          │
//! │                             price = 6.00 (last write wins)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RETURNING the row as it is now                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lookup and the write are one statement, so two concurrent entries for
//! the same name both land on a single row.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use hz_core::{Money, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product, or merges into the one with the same name.
    ///
    /// ## Arguments
    /// * `name` - Product name; surrounding whitespace is ignored
    /// * `stock` - Units to add (initial stock for a new product)
    /// * `price` - Unit price; replaces the existing price on merge
    ///
    /// ## Returns
    /// The product row after the write.
    pub async fn add_or_merge(&self, name: &str, stock: i64, price: Money) -> DbResult<Product> {
        let name = name.trim();
        debug!(name = %name, stock, price_cents = price.cents(), "Adding or merging product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, stock, price_cents)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                stock = products.stock + excluded.stock,
                price_cents = excluded.price_cents
            RETURNING id, name, stock, price_cents
            "#,
        )
        .bind(name)
        .bind(stock)
        .bind(price.cents())
        .fetch_one(&self.pool)
        .await?;

        info!(
            product_id = product.id,
            name = %product.name,
            stock = product.stock,
            "Product stored"
        );
        Ok(product)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, stock, price_cents FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its exact (trimmed) name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, stock, price_cents FROM products WHERE name = ?1",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the whole catalog, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, stock, price_cents FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Deletes a product.
    ///
    /// Deleting an id that does not exist is not an error. Purchases and
    /// sales that reference the product are kept.
    ///
    /// ## Returns
    /// Whether a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(product_id = id, "Product deleted");
        } else {
            debug!(product_id = id, "Delete of unknown product ignored");
        }
        Ok(removed)
    }

    /// Counts products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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
    use crate::{Database, DbConfig};
    use hz_core::Money;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_new_product() {
        let db = db().await;
        let product = db
            .products()
            .add_or_merge("Gadget", 10, Money::from_cents(500))
            .await
            .unwrap();

        assert!(product.id > 0);
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.stock, 10);
        assert_eq!(product.price_cents, 500);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_merge_adds_stock_and_overwrites_price() {
        let db = db().await;
        let repo = db.products();

        let first = repo.add_or_merge("Gadget", 10, Money::from_cents(500)).await.unwrap();
        let merged = repo.add_or_merge("Gadget", 5, Money::from_cents(600)).await.unwrap();

        assert_eq!(merged.id, first.id);
        assert_eq!(merged.stock, 15);
        assert_eq!(merged.price_cents, 600);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_merge_matches_trimmed_name() {
        let db = db().await;
        let repo = db.products();

        let first = repo.add_or_merge("Llavero", 1, Money::from_cents(1000)).await.unwrap();
        let merged = repo.add_or_merge("  Llavero ", 2, Money::from_cents(1200)).await.unwrap();

        assert_eq!(merged.id, first.id);
        assert_eq!(merged.name, "Llavero");
        assert_eq!(merged.stock, 3);

        // Names are case sensitive, like the original catalog
        let other = repo.add_or_merge("llavero", 1, Money::from_cents(1000)).await.unwrap();
        assert_ne!(other.id, first.id);
    }

    #[tokio::test]
    async fn test_merge_with_zero_stock_only_updates_price() {
        let db = db().await;
        let repo = db.products();

        repo.add_or_merge("Maceta", 4, Money::from_cents(2500)).await.unwrap();
        let merged = repo.add_or_merge("Maceta", 0, Money::from_cents(2000)).await.unwrap();

        assert_eq!(merged.stock, 4);
        assert_eq!(merged.price_cents, 2000);
    }

    #[tokio::test]
    async fn test_lookups_and_list_order() {
        let db = db().await;
        let repo = db.products();

        let a = repo.add_or_merge("Zeta", 1, Money::from_cents(100)).await.unwrap();
        let b = repo.add_or_merge("Alfa", 2, Money::from_cents(200)).await.unwrap();

        let listed = repo.list().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        assert_eq!(repo.get_by_id(b.id).await.unwrap(), Some(b.clone()));
        assert_eq!(repo.get_by_name("Zeta").await.unwrap(), Some(a));
        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(repo.get_by_name("Nada").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_existing_and_missing() {
        let db = db().await;
        let repo = db.products();
        let product = repo.add_or_merge("Gadget", 1, Money::from_cents(100)).await.unwrap();

        assert!(!repo.delete(product.id + 100).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete(product.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);

        // Deleting again is still fine
        assert!(!repo.delete(product.id).await.unwrap());
    }
}
