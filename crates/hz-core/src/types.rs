//! # Domain Types
//!
//! Core domain types used throughout HZ Stock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ PurchaseRecord  │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │◄──│  product_id     │   │  product_id  ──►│       │
//! │  │  name (unique)  │   │  quantity > 0   │   │  quantity > 0   │       │
//! │  │  stock >= 0     │   │  purchased_at   │   │  sold_at        │       │
//! │  │  price_cents    │   │  (minute)       │   │  (second)       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  MovementEntry: a ledger row joined with its product's name     │   │
//! │  │  (name is None when the product has been deleted since)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products are keyed by a store-assigned integer id and deduplicated by
//! their trimmed name. Ledger rows reference products by id only; deleting a
//! product does not touch them.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name; unique after trimming.
    pub name: String,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Unit price in cents. Overwritten on every add/merge.
    pub price_cents: i64,
}

impl Product {
    /// Unit price as [`Money`].
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Ledger Records
// =============================================================================

/// A stock-in event. Never modified after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PurchaseRecord {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,

    /// Local time, minute precision.
    #[ts(as = "String")]
    pub purchased_at: NaiveDateTime,
}

/// A stock-out event. Never modified after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleRecord {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,

    /// Local time, second precision.
    #[ts(as = "String")]
    pub sold_at: NaiveDateTime,
}

// =============================================================================
// Movement (read model)
// =============================================================================

/// Which ledger a [`MovementEntry`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MovementKind {
    Purchase,
    Sale,
}

impl MovementKind {
    /// Timestamp format used when printing entries of this kind.
    ///
    /// Purchases are recorded to the minute and sales to the second, so
    /// each ledger prints at the precision it stores.
    pub const fn timestamp_format(self) -> &'static str {
        match self {
            MovementKind::Purchase => "%Y-%m-%d %H:%M",
            MovementKind::Sale => "%Y-%m-%d %H:%M:%S",
        }
    }
}

/// A purchase or sale row joined with the current name of its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MovementEntry {
    pub id: i64,
    pub product_id: i64,

    /// `None` when the product was deleted after the movement.
    pub product_name: Option<String>,

    pub quantity: i64,

    #[ts(as = "String")]
    pub recorded_at: NaiveDateTime,
}

impl MovementEntry {
    /// Name to print for this row.
    ///
    /// Rows whose product no longer exists are kept in reports and labelled
    /// with the id they referenced.
    pub fn display_name(&self) -> String {
        match &self.product_name {
            Some(name) => name.clone(),
            None => format!("(eliminado #{})", self.product_id),
        }
    }

    /// Timestamp rendered at the precision of the given ledger.
    pub fn timestamp_label(&self, kind: MovementKind) -> String {
        self.recorded_at.format(kind.timestamp_format()).to_string()
    }
}

// =============================================================================
// Timestamp Precision
// =============================================================================

/// Drops seconds and sub-seconds (purchase ledger precision).
pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    let at = truncate_to_second(at);
    at.with_second(0).unwrap_or(at)
}

/// Drops sub-second precision (sale ledger precision).
pub fn truncate_to_second(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

// =============================================================================
// Unit Tests
// =============================================================================
