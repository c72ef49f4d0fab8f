//! # Validation Module
//!
//! Client-side checks run before a mutation is dispatched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console view                                                  │
//! │  └── THIS MODULE: required fields, ranges, page bounds                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (storefront-api)                                     │
//! │  └── No checks at all. Values are sent exactly as given.                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Server                                                        │
//! │  └── Authoritative validation, answers with an error envelope           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The services deliberately skip validation, so a caller that wants to send
//! e.g. a zero quantity can still do so.
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_cart_quantity, validate_page_size};
//!
//! assert!(validate_cart_quantity(2).is_ok());
//! assert!(validate_page_size(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ProductFormData, ProductUpdate};
use crate::MAX_PAGE_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Smallest price the server accepts for a product.
pub const MIN_PRICE: Money = Money::from_cents(1);

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: must not be blank.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    Ok(())
}

/// Validates a product price: at least 0.01.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price < MIN_PRICE {
        return Err(ValidationError::TooSmall {
            field: "price".to_string(),
            min: "0.01".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock quantity: zero or more.
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::TooSmall {
            field: "quantity".to_string(),
            min: "0".to_string(),
        });
    }
    Ok(())
}

/// Validates a cart line quantity: one or more.
pub fn validate_cart_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::TooSmall {
            field: "quantity".to_string(),
            min: "1".to_string(),
        });
    }
    Ok(())
}

/// Validates a page number: one or more.
pub fn validate_page_num(page_num: u32) -> ValidationResult<()> {
    if page_num < 1 {
        return Err(ValidationError::TooSmall {
            field: "pageNum".to_string(),
            min: "1".to_string(),
        });
    }
    Ok(())
}

/// Validates a page size: 1 to 100 inclusive.
pub fn validate_page_size(page_size: u32) -> ValidationResult<()> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ValidationError::OutOfRange {
            field: "pageSize".to_string(),
            min: 1,
            max: i64::from(MAX_PAGE_SIZE),
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a full create form.
pub fn validate_product_form(form: &ProductFormData) -> ValidationResult<()> {
    validate_name(&form.name)?;
    validate_price(form.price)?;
    validate_stock(form.quantity)
}

/// Validates only the fields present in a partial update.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    if let Some(quantity) = update.quantity {
        validate_stock(quantity)?;
    }
    Ok(())
}
