//! # Cart Engine
//!
//! Line-item arithmetic over an ordered cart.
//!
//! ## Ownership Model: Value Semantics
//! Every editing operation borrows the cart and returns a NEW cart. The
//! caller's previous value is never mutated, so an older snapshot held by
//! the UI stays valid.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Scan / type code ──► add_item_by_code() ───► lines + [new line]       │
//! │                                                                         │
//! │  Change quantity ───► update_quantity(i) ───► lines[i] recomputed      │
//! │                                                                         │
//! │  Click remove ──────► remove_item(i) ───────► lines - lines[i]         │
//! │                                                                         │
//! │  Show total ────────► subtotal() ───────────► Σ amount, rounded once   │
//! │                                                                         │
//! │  Misses (unknown code, stale index) return the cart unchanged.         │
//! │  The checked_* forms say which of the two happened.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use till_core::cart::Cart;
//! use till_core::money::Money;
//! use till_core::types::Product;
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
//! let cart = Cart::new().add_item_by_code(&catalog, "a1");
//! let cart = cart.update_quantity(0, 4);
//! assert_eq!(cart.subtotal(), Money::from_cents(1000));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, PriceLookup, Product};

// =============================================================================
// Outcomes
// =============================================================================

/// What `checked_add_item_by_code` did.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A line was appended at `index`.
    Added { index: usize },
    /// No product matched the code.
    NotFound { code: String },
}

impl AddOutcome {
    /// Turns a miss into `CoreError::ProductNotFound`.
    pub fn into_result(self) -> CoreResult<usize> {
        match self {
            AddOutcome::Added { index } => Ok(index),
            AddOutcome::NotFound { code } => Err(CoreError::ProductNotFound(code)),
        }
    }
}

/// What `checked_update_quantity` did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated { index: usize },
    OutOfRange { index: usize, len: usize },
}

impl UpdateOutcome {
    /// Turns a miss into `CoreError::LineOutOfRange`.
    pub fn into_result(self) -> CoreResult<usize> {
        match self {
            UpdateOutcome::Updated { index } => Ok(index),
            UpdateOutcome::OutOfRange { index, len } => {
                Err(CoreError::LineOutOfRange { index, len })
            }
        }
    }
}

/// What `checked_remove_item` did.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// `line` was taken out of position `index`.
    Removed { index: usize, line: LineItem },
    OutOfRange { index: usize, len: usize },
}

impl RemoveOutcome {
    /// Turns a miss into `CoreError::LineOutOfRange`.
    pub fn into_result(self) -> CoreResult<LineItem> {
        match self {
            RemoveOutcome::Removed { line, .. } => Ok(line),
            RemoveOutcome::OutOfRange { index, len } => {
                Err(CoreError::LineOutOfRange { index, len })
            }
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered list of line items for one pending transaction.
///
/// ## Invariants
/// - Order is insertion order
/// - The same code may appear on several lines (no merge-on-add)
/// - Index arguments are 0-based and bounds-checked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart(Vec<LineItem>);

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Seeds a cart with existing lines, e.g. a transaction loaded back from
    /// the API. Amounts are taken as given.
    pub fn from_lines(lines: Vec<LineItem>) -> Self {
        Cart(lines)
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.0
    }

    /// Returns the line at `index`, if any.
    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.0.get(index)
    }

    /// Number of lines (not units).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of quantities across all lines, saturating at the `i64` range.
    pub fn total_quantity(&self) -> i64 {
        self.0
            .iter()
            .map(LineItem::quantity)
            .fold(0i64, i64::saturating_add)
    }

    /// Returns an empty cart; used after checkout.
    pub fn cleared(&self) -> Self {
        Cart::new()
    }

    // -------------------------------------------------------------------------
    // Add
    // -------------------------------------------------------------------------

    /// Looks `code` up in the catalog and appends a quantity-1 line.
    ///
    /// Unknown codes leave the cart unchanged.
    pub fn add_item_by_code(&self, catalog: &[Product], code: &str) -> Cart {
        self.checked_add_item_by_code(catalog, code).0
    }

    /// Like [`Cart::add_item_by_code`], also reporting whether a product
    /// matched.
    pub fn checked_add_item_by_code(&self, catalog: &[Product], code: &str) -> (Cart, AddOutcome) {
        match catalog.iter().find(|p| p.matches_code(code)) {
            Some(product) => self.appended(LineItem::from_product(product)),
            None => (
                self.clone(),
                AddOutcome::NotFound {
                    code: code.to_string(),
                },
            ),
        }
    }

    /// Appends a line built from the price service's answer for a barcode.
    pub fn add_priced_item(&self, lookup: &PriceLookup) -> Cart {
        self.appended(LineItem::from_price_lookup(lookup)).0
    }

    fn appended(&self, line: LineItem) -> (Cart, AddOutcome) {
        let mut lines = self.0.clone();
        lines.push(line);
        let index = lines.len() - 1;
        (Cart(lines), AddOutcome::Added { index })
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Sets the quantity of line `index` and recomputes its amount.
    ///
    /// Any quantity is accepted, including zero and negatives. Out-of-range
    /// indices leave the cart unchanged.
    pub fn update_quantity(&self, index: usize, quantity: i64) -> Cart {
        self.checked_update_quantity(index, quantity).0
    }

    /// Like [`Cart::update_quantity`], also reporting a bad index.
    pub fn checked_update_quantity(&self, index: usize, quantity: i64) -> (Cart, UpdateOutcome) {
        let Some(line) = self.0.get(index) else {
            return (
                self.clone(),
                UpdateOutcome::OutOfRange {
                    index,
                    len: self.0.len(),
                },
            );
        };

        let mut lines = self.0.clone();
        lines[index] = line.with_quantity(quantity);
        (Cart(lines), UpdateOutcome::Updated { index })
    }

    // -------------------------------------------------------------------------
    // Remove
    // -------------------------------------------------------------------------

    /// Removes line `index`; later lines shift down by one.
    ///
    /// Out-of-range indices (including any index on an empty cart) leave the
    /// cart unchanged.
    pub fn remove_item(&self, index: usize) -> Cart {
        self.checked_remove_item(index).0
    }

    /// Like [`Cart::remove_item`], also returning the removed line.
    pub fn checked_remove_item(&self, index: usize) -> (Cart, RemoveOutcome) {
        if index >= self.0.len() {
            return (
                self.clone(),
                RemoveOutcome::OutOfRange {
                    index,
                    len: self.0.len(),
                },
            );
        }

        let mut lines = self.0.clone();
        let line = lines.remove(index);
        (Cart(lines), RemoveOutcome::Removed { index, line })
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of all line amounts, rounded to 2 decimals once at the end.
    pub fn subtotal(&self) -> Money {
        self.0
            .iter()
            .map(LineItem::amount)
            .sum::<Money>()
            .round_2dp()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Cart totals summary for views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn product(code: &str, name: &str, price: Money) -> Product {
        Product {
            code: code.to_string(),
            name: name.to_string(),
            category: "General".to_string(),
            unit: None,
            description: None,
            price: Some(price),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("A1", "Soap", Money::from_cents(250)),
            product("B2", "Shampoo", Money::new(dec!(19.995))),
            product("C3", "Towel", Money::from_cents(1299)),
        ]
    }

    fn three_line_cart() -> Cart {
        let catalog = catalog();
        Cart::new()
            .add_item_by_code(&catalog, "A1")
            .add_item_by_code(&catalog, "B2")
            .add_item_by_code(&catalog, "C3")
    }

    #[test]
    fn test_end_to_end_scenario() {
        let catalog = vec![product("A1", "Soap", Money::from_cents(250))];
        let cart = Cart::new();

        let cart = cart.add_item_by_code(&catalog, "a1");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].amount(), Money::from_cents(250));

        let cart = cart.update_quantity(0, 4);
        assert_eq!(cart.lines()[0].amount(), Money::from_cents(1000));
        assert_eq!(cart.subtotal(), Money::from_cents(1000));

        let cart = cart.remove_item(0);
        assert!(cart.is_empty());
        assert_eq!(cart, Cart::new());
    }

    #[test]
    fn test_unknown_code_leaves_cart_unchanged() {
        let before = three_line_cart();

        let after = before.add_item_by_code(&catalog(), "ZZ9");
        assert_eq!(after, before);

        let after = before.add_item_by_code(&[], "A1");
        assert_eq!(after, before);
    }

    #[test]
    fn test_checked_add_reports_outcome() {
        let (cart, outcome) = Cart::new().checked_add_item_by_code(&catalog(), "b2");
        assert_eq!(outcome, AddOutcome::Added { index: 0 });
        assert_eq!(cart.lines()[0].code(), "B2");

        let (cart, outcome) = cart.checked_add_item_by_code(&catalog(), "nope");
        assert_eq!(
            outcome,
            AddOutcome::NotFound {
                code: "nope".to_string()
            }
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(
            outcome.into_result(),
            Err(CoreError::ProductNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_duplicate_codes_are_separate_lines() {
        let catalog = catalog();
        let cart = Cart::new()
            .add_item_by_code(&catalog, "A1")
            .add_item_by_code(&catalog, "a1");

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_cents(500));
    }

    #[test]
    fn test_add_uses_first_match() {
        let catalog = vec![
            product("X", "First", Money::from_cents(100)),
            product("x", "Second", Money::from_cents(200)),
        ];
        let cart = Cart::new().add_item_by_code(&catalog, "X");
        assert_eq!(cart.lines()[0].name(), "First");
    }

    #[test]
    fn test_operations_do_not_touch_the_original() {
        let original = three_line_cart();
        let snapshot = original.clone();

        let _ = original.add_item_by_code(&catalog(), "A1");
        let _ = original.update_quantity(1, 9);
        let _ = original.remove_item(0);

        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_update_changes_only_target_line() {
        let before = three_line_cart();
        let after = before.update_quantity(1, 3);

        assert_eq!(after.lines()[0], before.lines()[0]);
        assert_eq!(after.lines()[2], before.lines()[2]);

        let old = &before.lines()[1];
        let new = &after.lines()[1];
        assert_eq!(new.quantity(), 3);
        assert_eq!(new.amount().amount(), dec!(59.99));
        assert_eq!(new.code(), old.code());
        assert_eq!(new.name(), old.name());
        assert_eq!(new.category(), old.category());
        assert_eq!(new.unit(), old.unit());
        assert_eq!(new.unit_price(), old.unit_price());
        assert_eq!(new.discount(), old.discount());
        assert_eq!(new.taxable(), old.taxable());
    }

    #[test]
    fn test_update_accepts_zero_and_negative_quantities() {
        let cart = three_line_cart();

        let zeroed = cart.update_quantity(0, 0);
        assert_eq!(zeroed.lines()[0].quantity(), 0);
        assert_eq!(zeroed.lines()[0].amount(), Money::zero());
        assert_eq!(zeroed.len(), 3);

        let negative = cart.update_quantity(0, -2);
        assert_eq!(negative.lines()[0].amount(), Money::from_cents(-500));
    }

    #[test]
    fn test_update_out_of_range_is_a_no_op() {
        let before = three_line_cart();

        assert_eq!(before.update_quantity(3, 5), before);
        assert_eq!(Cart::new().update_quantity(0, 5), Cart::new());

        let (after, outcome) = before.checked_update_quantity(7, 5);
        assert_eq!(after, before);
        assert_eq!(outcome, UpdateOutcome::OutOfRange { index: 7, len: 3 });
        assert_eq!(
            outcome.into_result(),
            Err(CoreError::LineOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn test_remove_shifts_later_lines_down() {
        let before = three_line_cart();
        let after = before.remove_item(1);

        assert_eq!(after.len(), 2);
        assert_eq!(after.lines()[0], before.lines()[0]);
        assert_eq!(after.lines()[1], before.lines()[2]);
    }

    #[test]
    fn test_checked_remove_returns_line() {
        let before = three_line_cart();
        let (after, outcome) = before.checked_remove_item(0);

        assert_eq!(after.len(), 2);
        let removed = outcome.into_result().unwrap();
        assert_eq!(removed.code(), "A1");
    }

    #[test]
    fn test_remove_on_empty_or_bad_index_is_a_no_op() {
        assert_eq!(Cart::new().remove_item(0), Cart::new());

        let before = three_line_cart();
        assert_eq!(before.remove_item(3), before);
        assert_eq!(before.remove_item(usize::MAX), before);

        let (_, outcome) = Cart::new().checked_remove_item(0);
        assert_eq!(outcome, RemoveOutcome::OutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_subtotal_sums_then_rounds_once() {
        let catalog = vec![product("H1", "Half cent", Money::new(dec!(10.005)))];
        let cart = Cart::new()
            .add_item_by_code(&catalog, "H1")
            .add_item_by_code(&catalog, "h1");

        assert_eq!(cart.lines()[0].amount().amount(), dec!(10.005));
        assert_eq!(cart.lines()[1].amount().amount(), dec!(10.005));
        assert_eq!(cart.subtotal().amount(), dec!(20.01));
    }

    #[test]
    fn test_seeded_lines_keep_their_amounts() {
        let json = r#"[
            {"barcodeId":"S1","title":"Seed 1","quantity":1,"price":10.005,"totalPrice":10.005},
            {"barcodeId":"S2","title":"Seed 2","quantity":1,"price":10.005,"totalPrice":10.005}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal().amount(), dec!(20.01));
    }

    #[test]
    fn test_subtotal_of_empty_cart_is_zero() {
        assert_eq!(Cart::new().subtotal(), Money::zero());
    }

    #[test]
    fn test_subtotal_mixed_lines() {
        let cart = three_line_cart().update_quantity(1, 3).update_quantity(2, 2);
        // 2.50 + 59.99 + 25.98
        assert_eq!(cart.subtotal().amount(), dec!(88.47));
    }

    #[test]
    fn test_add_priced_item() {
        let lookup = PriceLookup {
            price_id: Some(7),
            barcode_id: "8991002".to_string(),
            title: "Rice 5kg".to_string(),
            quantity_type: "bag".to_string(),
            amount: Money::from_cents(6500),
            unit_list: Vec::new(),
        };

        let cart = three_line_cart().add_priced_item(&lookup);
        assert_eq!(cart.len(), 4);
        assert_eq!(cart.lines()[3].code(), "8991002");
        assert_eq!(cart.lines()[3].quantity(), 1);
        assert_eq!(cart.lines()[3].amount(), Money::from_cents(6500));
    }

    #[test]
    fn test_price_snapshot_survives_catalog_change() {
        let mut catalog = catalog();
        let cart = Cart::new().add_item_by_code(&catalog, "A1");

        catalog[0].price = Some(Money::from_cents(999));
        let cart = cart.update_quantity(0, 2);

        assert_eq!(cart.lines()[0].unit_price(), Money::from_cents(250));
        assert_eq!(cart.lines()[0].amount(), Money::from_cents(500));
    }

    #[test]
    fn test_totals_summary() {
        let cart = three_line_cart().update_quantity(0, 4);
        let totals = cart.totals();

        assert_eq!(totals.line_count, 3);
        assert_eq!(totals.total_quantity, 6);
        assert_eq!(totals.subtotal, cart.subtotal());
    }

    #[test]
    fn test_cleared() {
        assert!(three_line_cart().cleared().is_empty());
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let cart = three_line_cart()
            .update_quantity(0, i64::MAX)
            .update_quantity(1, i64::MAX);

        assert_eq!(cart.total_quantity(), i64::MAX);
        assert_eq!(cart.totals().total_quantity, i64::MAX);

        let catalog = vec![product("BIG", "Big", Money::new(dec!(100000000000)))];
        let cart = Cart::new()
            .add_item_by_code(&catalog, "BIG")
            .add_item_by_code(&catalog, "BIG")
            .update_quantity(0, i64::MAX)
            .update_quantity(1, i64::MAX);

        assert_eq!(cart.lines()[0].amount().amount(), Decimal::MAX);
        assert_eq!(cart.subtotal().amount(), Decimal::MAX);

        let cart = cart.update_quantity(1, i64::MIN);
        assert_eq!(cart.total_quantity(), -1);
    }
}
