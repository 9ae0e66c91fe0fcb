//! # Database Handle
//!
//! Opens the shop's SQLite file, applies migrations and hands out
//! repositories that share one pool.
//!
//! ## Who Holds a Connection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Database::new(DbConfig::new("empresa_3d.db"))                         │
//! │       │  journal_mode=WAL, synchronous=NORMAL, busy_timeout            │
//! │       ▼                                                                 │
//! │  SqlitePool (max_connections)                                          │
//! │       │                                                                 │
//! │       ├── products().list()        borrow ─► query ─► release          │
//! │       ├── purchases().record()     BEGIN ─► 2 writes ─► COMMIT         │
//! │       └── sales().begin_sale()     BEGIN ─► 2 writes ─► PendingSale    │
//! │                                          (held until commit or drop)   │
//! │                                                                         │
//! │  A second writer waits up to busy_timeout for the first to finish      │
//! │  instead of failing with SQLITE_BUSY.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::purchase::PurchaseRepository;
use crate::repository::sale::SaleRepository;

const MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the database.
///
/// ```rust,ignore
/// let config = DbConfig::new("empresa_3d.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created on first open. `:memory:` for a private database.
    pub path: PathBuf,

    /// Pool size. Default 5.
    pub max_connections: u32,

    /// How long a request waits for a free pooled connection. Default 30 s.
    pub acquire_timeout: Duration,

    /// How long a writer waits on another writer's lock. Default 5 s.
    pub busy_timeout: Duration,

    /// Apply embedded migrations while opening. Default true.
    pub migrate: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    /// Private in-memory database for tests.
    ///
    /// Limited to one connection: every connection to `:memory:` would
    /// otherwise see its own empty database.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(MEMORY)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens without touching the schema.
    pub fn without_migrations(mut self) -> Self {
        self.migrate = false;
        self
    }

    fn is_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };
        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared database handle. Clones share the pool.
///
/// ```rust,ignore
/// let stock = db.products().get_by_id(id).await?.map(|p| p.stock);
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.path.display(), "Opening database");

        let mut options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);
        if config.is_memory() {
            // The data lives only as long as its one connection.
            options = options.idle_timeout(None).max_lifetime(None);
        }

        let pool = options
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(
            max_connections = config.max_connections,
            busy_timeout_ms = config.busy_timeout.as_millis() as u64,
            "Pool ready"
        );

        let db = Database { pool };
        if config.migrate {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Catalog.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Stock-in ledger.
    pub fn purchases(&self) -> PurchaseRepository {
        PurchaseRepository::new(self.pool.clone())
    }

    /// Stock-out ledger.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Waits for borrowed connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database closed");
    }

    /// True when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
