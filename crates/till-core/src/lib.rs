//! # till-core: Pure Business Logic for Till
//!
//! This crate is the cart engine behind the Till checkout screen. It
//! contains the line-item arithmetic as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Checkout UI (TypeScript)                     │   │
//! │  │    Scan ──► Cart list ──► Quantity edit ──► Pay                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-session                                 │   │
//! │  │    one cart per checkout session, strict/lenient mode           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────┐         │   │
//! │  │   │  types  │  │  money  │  │  cart   │  │ envelope │         │   │
//! │  │   │ Product │  │  Money  │  │  Cart   │  │ invoice  │         │   │
//! │  │   │LineItem │  │ round   │  │ totals  │  │validation│         │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Remote product / invoice API: a collaborator, never called from here  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, LineItem, Unit, PriceLookup
//! - [`money`] - Exact decimal money and the one rounding rule
//! - [`cart`] - The cart engine (add, update, remove, subtotal)
//! - [`envelope`] - `{data, message}` responses and status handling
//! - [`invoice`] - Invoice payload built from a cart
//! - [`validation`] - Strict-mode input rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, dates are passed in
//! 2. **Value Semantics**: cart edits return a new cart
//! 3. **Decimal Money**: no binary floating point in any amount
//! 4. **Soft Misses**: unknown codes and bad indices are no-ops unless the
//!    caller asks for a checked outcome
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, Money, Product};
//!
//! let catalog = vec![Product {
//!     code: "A1".into(),
//!     name: "Soap".into(),
//!     category: "Bath".into(),
//!     unit: None,
//!     description: None,
//!     price: Some(Money::from_cents(250)),
//! }];
//!
//! let cart = Cart::new().add_item_by_code(&catalog, "a1").update_quantity(0, 4);
//! assert_eq!(cart.subtotal().to_string(), "10.00");
//!
//! let cart = cart.remove_item(0);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod envelope;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartTotals, RemoveOutcome, UpdateOutcome};
pub use envelope::{ApiEnvelope, Resource, ResponseClass};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{InvoiceLine, TransactionInvoice};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines a strict session lets a cart hold.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity a strict session accepts for one line.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
