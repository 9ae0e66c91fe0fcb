//! # hz-core: Pure Business Logic for HZ Stock
//!
//! This crate is the **heart** of HZ Stock. It contains the domain types,
//! money arithmetic, validation rules and document layouts as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HZ Stock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Server (apps/server)                    │   │
//! │  │  add product ─► record purchase ─► record sale ─► download      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ hz-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  layout   │  │ documents │  │   │
//! │  │   │  Product  │  │   Money   │  │ Paginator │  │  Invoice  │  │   │
//! │  │   │  Ledger   │  │  "Q 9.99" │  │   Sheet   │  │  Reports  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 │                                 │                     │
//! │  ┌──────────────▼──────────────┐   ┌──────────────▼──────────────┐     │
//! │  │  hz-db (SQLite, ledger)     │   │  hz-render (PDF, XLSX)      │     │
//! │  └─────────────────────────────┘   └─────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PurchaseRecord, SaleRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and business rule validation
//! - [`layout`] - Pages of positioned text and the [`layout::Paginator`]
//! - [`sheet`] - Spreadsheet cell grids
//! - [`documents`] - Invoice, movement report and inventory sheet builders
//!
//! ## Example Usage
//!
//! ```rust
//! use hz_core::money::Money;
//!
//! let unit_price: Money = "6.00".parse().unwrap();
//! let total = unit_price.multiply_quantity(15).unwrap();
//!
//! assert_eq!(total.cents(), 9000);
//! assert_eq!(total.to_string(), "Q 90.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod documents;
pub mod error;
pub mod layout;
pub mod money;
pub mod sheet;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Business name printed on invoices, reports and the spreadsheet title.
///
/// The server can override it through configuration; this is the default.
pub const DEFAULT_BUSINESS_NAME: &str = "HZ Impresiones 3D";

/// Fixed currency prefix (Guatemalan quetzal).
///
/// The shop sells in a single currency, so this is not configurable.
pub const CURRENCY_PREFIX: &str = "Q";

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Upper bound for a single stock entry, purchase or sale quantity.
///
/// ## Business Reason
/// Prevents typos (an extra zero or five) from turning into absurd stock
/// levels.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Upper bound for a unit price, in cents (Q 10,000,000,000.00).
///
/// `MAX_PRICE_CENTS * MAX_QUANTITY` is 10^18, which fits in an `i64`, so any
/// accepted price times any accepted quantity is a valid invoice total.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;
