//! # Validation Module
//!
//! Strict-mode input rules for cart and checkout operations.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout UI (TypeScript)                                     │
//! │  └── Immediate feedback on the input box                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Strict session (till-session)                                │
//! │  └── THIS MODULE: rejects bad codes, quantities, payments              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart engine (cart.rs)                                        │
//! │  └── No validation at all; misses degrade to no-ops                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_code, validate_quantity};
//!
//! assert!(validate_code("8991002").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest code a scanner or keyboard entry may produce.
pub const MAX_CODE_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code or barcode.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 50 characters
///
/// Returns the trimmed code.
pub fn validate_code(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    Ok(code)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// The cart engine itself accepts 0 and negatives; this closes that gap for
/// strict callers.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates that one more line fits in a cart of `len` lines.
pub fn validate_cart_size(len: usize) -> ValidationResult<()> {
    if len >= MAX_CART_LINES {
        return Err(ValidationError::CartFull {
            max: MAX_CART_LINES,
        });
    }

    Ok(())
}

/// Validates a catalog price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a pay amount on its own; coverage of the total is checked when
/// the invoice is built.
pub fn validate_payment(pay_amount: Money) -> ValidationResult<()> {
    if pay_amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "pay amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
