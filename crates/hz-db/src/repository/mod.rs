//! # Repository Module
//!
//! Database repository implementations for HZ Stock.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Inventory service                                                     │
//! │       │                                                                 │
//! │       │  db.sales().begin_sale(product_id, 15)                         │
//! │       ▼                                                                 │
//! │  ProductRepository        PurchaseRepository     SaleRepository        │
//! │  ├── add_or_merge         ├── record             ├── begin_sale        │
//! │  ├── get_by_id / name     ├── get_by_id          ├── get_by_id         │
//! │  ├── list                 ├── list_entries       ├── list_entries      │
//! │  ├── delete               └── count              └── count             │
//! │  └── count                                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Every write that touches two tables runs in one transaction.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog: merge-by-name, lookup, delete
//! - [`purchase::PurchaseRepository`] - Stock-in ledger
//! - [`sale::SaleRepository`] - Stock-out ledger with guarded decrement

pub mod product;
pub mod purchase;
pub mod sale;

use chrono::{Local, NaiveDateTime};

/// Current wall-clock time in the shop's local timezone.
pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
