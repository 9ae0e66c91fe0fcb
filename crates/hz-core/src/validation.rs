//! # Validation Module
//!
//! Input parsing and validation for HZ Stock.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP form (apps/server)                                      │
//! │  └── Every field arrives as text, nothing is rejected by the extractor │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_*: text → typed value, with field-level errors              │
//! │  └── validate_*: business ranges on already typed values               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (name)                                                     │
//! │  └── CHECK (stock >= 0), CHECK (quantity > 0)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs before any write, so a rejected request leaves the
//! catalog and the ledgers untouched.
//!
//! ## Usage
//! ```rust
//! use hz_core::validation::{parse_price, parse_quantity, validate_product_name};
//!
//! let name = validate_product_name("  Gadget ").unwrap();
//! assert_eq!(name, "Gadget");
//!
//! assert_eq!(parse_quantity("15").unwrap(), 15);
//! assert!(parse_quantity("0").is_err());
//! assert_eq!(parse_price("6.00").unwrap().cents(), 600);
//! ```

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::{MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN, MAX_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
///
/// The trimmed form is the deduplication key, so `" Gadget"` and `"Gadget"`
/// are the same product.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an initial stock amount (zero allowed).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_QUANTITY).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a purchase or sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Free items are allowed; negative prices are not
/// - Must not exceed [`MAX_PRICE_CENTS`], so `price × quantity` always fits
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }
    Ok(())
}

// =============================================================================
// Text Parsers
// =============================================================================

fn parse_integer(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{raw}' is not a whole number"),
        })
}

/// Parses the stock field of the product form.
pub fn parse_stock(raw: &str) -> ValidationResult<i64> {
    let stock = parse_integer("stock", raw)?;
    validate_stock(stock)?;
    Ok(stock)
}

/// Parses the quantity field of the purchase and sale forms.
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let quantity = parse_integer("quantity", raw)?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

/// Parses the price field of the product form (e.g. `"6.00"`).
pub fn parse_price(raw: &str) -> ValidationResult<Money> {
    let price: Money = raw.parse().map_err(|err: ParseMoneyError| match err {
        ParseMoneyError::Empty => ValidationError::Required {
            field: "price".to_string(),
        },
        other => ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: other.to_string(),
        },
    })?;
    validate_price(price)?;
    Ok(price)
}

/// Parses a product id coming from a form field.
pub fn parse_id(field: &str, raw: &str) -> ValidationResult<i64> {
    let id = parse_integer(field, raw)?;
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================
