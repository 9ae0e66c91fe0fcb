//! # Domain Errors
//!
//! ```text
//! form text ──parse──► ValidationError ─┐
//!                                        ├──► CoreError ──► AppError (HTTP)
//! catalog / ledger rules ───────────────┘
//! ```
//!
//! Storage and rendering failures have their own types in hz-db and
//! hz-render; nothing here knows about SQL or files.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// A request that breaks a catalog or ledger rule.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// A sale asked for more units than are on hand.
    ///
    /// ```text
    /// stock 15, sell 20 ──► InsufficientStock { available: 15, requested: 20 }
    ///                       stock stays 15, no sale row, no invoice
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected form input. Always raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty, or only whitespace.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Text that is not a number, or a price with three decimals.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the form field that was rejected.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}
