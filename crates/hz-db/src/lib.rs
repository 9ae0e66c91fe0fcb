//! # hz-db: Database Layer for HZ Stock
//!
//! This crate provides database access for HZ Stock.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HZ Stock Data Flow                               │
//! │                                                                         │
//! │  Inventory service (record_sale)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      hz-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo    │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ PurchaseRepo   │   │ 001_initial_ │  │   │
//! │  │   │ Connection    │    │ SaleRepo       │   │  schema.sql  │  │   │
//! │  │   │ Management    │    │  └ PendingSale │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   empresa_3d.db: products, purchases, sales                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, purchase, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hz_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("empresa_3d.db")).await?;
//!
//! let gadget = db.products().add_or_merge("Gadget", 10, Money::from_cents(500)).await?;
//! db.purchases().record(gadget.id, 5).await?;
//!
//! match db.sales().begin_sale(gadget.id, 3).await? {
//!     SaleAttempt::Ready(pending) => { pending.commit().await?; }
//!     SaleAttempt::InsufficientStock { available } => { /* tell the user */ }
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::purchase::PurchaseRepository;
pub use repository::sale::{PendingSale, SaleAttempt, SaleRepository};
