//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    19.995 is stored as 19.99499999999999957...                          │
//! │    19.995 × 3 = 59.98499999... → rounds to 59.98  ❌ WRONG!             │
//! │                                                                         │
//! │  Integer cents can't hold the catalog price 19.995 at all.             │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals                                   │
//! │    19.995 × 3 = 59.985 exactly → rounds half-up to 59.99               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Rounding Function
//! Every rounded figure in the crate (line amount, subtotal, invoice total,
//! change due) goes through [`Money::round_2dp`]. Arithmetic in between is
//! exact, so rounding happens once per computed field and never compounds.
//!
//! Arithmetic saturates at the decimal range rather than panicking, so any
//! quantity the cart accepts yields a value.
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use till_core::money::Money;
//!
//! let price = Money::new(Decimal::new(19995, 3)); // 19.995
//! let amount = price.times(3).round_2dp();
//! assert_eq!(amount, Money::from_cents(5999));   // 59.99
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// Number of decimal places kept at presentation boundaries.
pub const MONEY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (not f64)**: exact base-10 arithmetic, no binary drift
/// - **Unrounded storage**: a catalog price of 19.995 stays 19.995 until a
///   computed field is rounded
/// - **Serialized as a JSON number**: matches the remote API's payloads
///
/// ## Where Money Is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► LineItem.unit_price ──► LineItem.amount             │
/// │                                                   │                     │
/// │                                                   ▼                     │
/// │                    Cart subtotal (sum, then rounded once)               │
/// │                                                   │                     │
/// │                                                   ▼                     │
/// │                    TransactionInvoice.total_transaction                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Wraps an exact decimal value.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).to_string(), "2.50");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to 2 decimal places, half away from zero.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF AWAY FROM ZERO ("standard half-up" on the magnitude)          │
    /// │                                                                     │
    /// │    59.985  →  59.99        20.010 → 20.01                           │
    /// │    59.984  →  59.98       -59.985 → -59.99                          │
    /// │                                                                     │
    /// │  Bankers rounding would give 59.98 for 59.985; we don't use it.     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn round_2dp(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies by a quantity without rounding.
    ///
    /// Saturates at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.times(3), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn times(&self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the rounded value with exactly two decimals ("10.00").
///
/// Currency symbols and localization belong to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.round_2dp().0;
        rounded.rescale(MONEY_SCALE);
        write!(f, "{}", rounded)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Exact sum, saturating at the decimal range; callers round the result once.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1099).amount(), dec!(10.99));
        assert_eq!(Money::from_cents(-550).amount(), dec!(-5.50));
    }

    #[test]
    fn test_round_half_up_on_exact_midpoint() {
        // 19.995 × 3 = 59.985 exactly; f64 would land on 59.98
        let amount = Money::new(dec!(19.995)).times(3).round_2dp();
        assert_eq!(amount.amount(), dec!(59.99));
    }

    #[test]
    fn test_round_below_midpoint() {
        assert_eq!(Money::new(dec!(59.984)).round_2dp().amount(), dec!(59.98));
        assert_eq!(Money::new(dec!(0.005)).round_2dp().amount(), dec!(0.01));
    }

    #[test]
    fn test_round_negative_goes_away_from_zero() {
        assert_eq!(Money::new(dec!(-2.505)).round_2dp().amount(), dec!(-2.51));
    }

    #[test]
    fn test_sum_then_round() {
        let amounts = [Money::new(dec!(10.005)), Money::new(dec!(10.005))];

        let sum_then_round: Money = amounts.iter().sum::<Money>().round_2dp();
        assert_eq!(sum_then_round.amount(), dec!(20.01));

        // Rounding each term first drifts by a cent
        let round_then_sum: Money = amounts.iter().map(|m| m.round_2dp()).sum();
        assert_eq!(round_then_sum.amount(), dec!(20.02));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1000).to_string(), "10.00");
        assert_eq!(Money::new(dec!(2.5)).to_string(), "2.50");
        assert_eq!(Money::new(dec!(59.985)).to_string(), "59.99");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!(a + b, Money::from_cents(1250));
        assert_eq!(a - b, Money::from_cents(750));

        let mut c = a;
        c += b;
        assert_eq!(c, Money::from_cents(1250));
    }

    #[test]
    fn test_times_is_exact() {
        assert_eq!(Money::new(dec!(0.333)).times(3).amount(), dec!(0.999));
        assert_eq!(Money::from_cents(250).times(0), Money::zero());
        assert_eq!(Money::from_cents(250).times(-2), Money::from_cents(-500));
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }

    #[test]
    fn test_scale_does_not_affect_equality() {
        assert_eq!(Money::new(dec!(2.5)), Money::new(dec!(2.50)));
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::from_cents(250)).unwrap();
        assert_eq!(json, "2.5");

        let parsed: Money = serde_json::from_str("19.995").unwrap();
        assert_eq!(parsed.amount(), dec!(19.995));
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Money::new(dec!(100000000000));
        assert_eq!(huge.times(i64::MAX).amount(), Decimal::MAX);
        assert_eq!(huge.times(i64::MIN).amount(), Decimal::MIN);

        let max = Money::new(Decimal::MAX);
        assert_eq!((max + max).amount(), Decimal::MAX);
        assert_eq!([max, max].iter().sum::<Money>().amount(), Decimal::MAX);
        assert_eq!((Money::new(Decimal::MIN) - max).amount(), Decimal::MIN);

        // Still renders and rounds
        assert_eq!(max.round_2dp(), max);
        assert!(!max.to_string().is_empty());
    }
}
