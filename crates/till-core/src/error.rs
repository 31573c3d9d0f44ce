//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Cart misses, remote envelopes, invoices        │
//! │  └── ValidationError  - Strict-mode input failures                     │
//! │                                                                         │
//! │  till-session errors (separate crate)                                  │
//! │  ├── SessionError     - Unknown session, poisoned lock, core errors    │
//! │  └── ConfigError      - Config file / value problems                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on Cart Misses
//! The cart engine itself never returns these. An unknown code or a bad
//! line index is a silent no-op on the plain operations; the `checked_*`
//! forms report an outcome, and only `into_result()` turns that outcome into
//! a `CoreError`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// No product in the catalog snapshot matches the code.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A line index is outside the cart.
    ///
    /// ## When This Occurs
    /// - UI list got out of sync with the cart (stale index)
    /// - Removing from an empty cart
    #[error("Line {index} is out of range (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Cart has no lines and cannot be invoiced.
    #[error("Cart is empty")]
    EmptyCart,

    /// Payment amount is invalid.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// The remote API answered with a failure status.
    ///
    /// `message` is the envelope's message when it carried one.
    #[error("Remote call failed ({status}): {message}")]
    Remote { status: u16, message: String },

    /// A response body was not a valid `{data, message}` envelope.
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedEnvelope(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Only strict-mode callers run validation; the cart engine accepts any
/// input and degrades to no-ops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Cart already holds the maximum number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartFull { max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
