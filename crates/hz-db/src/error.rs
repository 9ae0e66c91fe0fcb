//! # Database Error Types
//!
//! ```text
//! sqlx::Error ──► DbError ──► AppError (apps/server)
//!                   │
//!                   ├── NotFound ─────────────► 404
//!                   └── everything else ──────► 500 (storage failure)
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A purchase, sale or invoice reissue referenced a row that is not there.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `products.name` already taken. The upsert path never raises it.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Schema CHECK rejected a row: negative stock or non-positive quantity.
    #[error("Constraint violated: {0}")]
    CheckViolation(String),

    /// The database file could not be opened or created.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Commit or rollback did not go through.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// No pooled connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "?"),

            // SQLite reports "UNIQUE constraint failed: products.name"
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation {
                        field: message
                            .rsplit(": ")
                            .next()
                            .unwrap_or_default()
                            .to_string(),
                        value: String::new(),
                    },
                    ErrorKind::CheckViolation => DbError::CheckViolation(message),
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            sqlx::Error::Io(io) => DbError::ConnectionFailed(io.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product not found: 42");
        assert!(err.is_not_found());
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_schema_constraints_are_classified() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO products (name, stock, price_cents) VALUES ('Gadget', 1, 100)")
            .execute(db.pool())
            .await
            .unwrap();

        let dup: DbError = sqlx::query(
            "INSERT INTO products (name, stock, price_cents) VALUES ('Gadget', 1, 100)",
        )
        .execute(db.pool())
        .await
        .unwrap_err()
        .into();
        assert!(matches!(dup, DbError::UniqueViolation { ref field, .. } if field == "products.name"));

        let negative: DbError = sqlx::query("UPDATE products SET stock = -1")
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();
        assert!(matches!(negative, DbError::CheckViolation(_)));
    }
}
