//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │  PriceLookup    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (barcode) │──►│  code           │◄──│  barcode_id     │       │
//! │  │  name           │   │  quantity       │   │  amount         │       │
//! │  │  category       │   │  unit_price     │   │  unit_list      │       │
//! │  │  price?         │   │  amount (calc)  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │      Unit       │   unit of measure offered by the price service    │
//! │  │  id?, name      │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` copies what it needs from the product when it is created.
//! A later catalog price change never reaches an existing line.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Unit
// =============================================================================

/// A unit of measure ("pcs", "box", "kg").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// The remote API sends `null` where it has no unit list.
fn unit_list_or_empty<'de, D>(deserializer: D) -> Result<Vec<Unit>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Unit>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Product
// =============================================================================

/// A product in a catalog snapshot.
///
/// Decoding accepts the spellings the product endpoints use
/// (`barcodeId`, `title`, `quantityType`, `amount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Code or barcode, unique within a catalog snapshot.
    #[serde(alias = "barcodeId", alias = "barcodeID")]
    pub code: String,

    /// Display name.
    #[serde(alias = "product_name", alias = "title")]
    pub name: String,

    #[serde(default)]
    pub category: String,

    /// Unit of measure.
    #[serde(default, alias = "quantityType")]
    pub unit: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit price. Absent prices count as zero when added to a cart.
    #[serde(default, alias = "amount")]
    pub price: Option<Money>,
}

impl Product {
    /// Case-insensitive exact comparison against a scanned or typed code.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.to_lowercase() == code.to_lowercase()
    }

    /// Returns the price, or zero when the catalog has none.
    #[inline]
    pub fn price_or_zero(&self) -> Money {
        self.price.unwrap_or_default()
    }
}

// =============================================================================
// Price Lookup
// =============================================================================

/// The price service's answer for one barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceLookup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<i64>,
    pub barcode_id: String,
    pub title: String,
    #[serde(default)]
    pub quantity_type: String,
    pub amount: Money,
    #[serde(default, deserialize_with = "unit_list_or_empty")]
    pub unit_list: Vec<Unit>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of a cart.
///
/// ## Invariants
/// - A freshly added line has `amount == unit_price`, unrounded; after a
///   quantity update `amount == round(quantity × unit_price, 2)`
/// - `unit_price` is frozen at add-time
///
/// Deserialized lines and lines passed to `Cart::from_lines` are trusted:
/// their `totalPrice` is kept as given until the next quantity update.
///
/// ## Wire Format
/// Field names follow the remote API's transaction item:
/// ```json
/// { "barcodeId": "A1", "title": "Soap", "category": "Bath",
///   "quantityType": "pcs", "quantity": 4, "price": 2.5,
///   "totalPrice": 10.0, "discount": 0.0, "taxable": false,
///   "listUnitItem": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[serde(rename = "barcodeId")]
    code: String,

    #[serde(rename = "title")]
    name: String,

    #[serde(default)]
    category: String,

    #[serde(rename = "quantityType", default)]
    unit: Option<String>,

    quantity: i64,

    #[serde(rename = "price")]
    unit_price: Money,

    #[serde(rename = "totalPrice")]
    amount: Money,

    /// Carried through to the invoice; never applied by the engine.
    #[serde(default)]
    discount: Money,

    #[serde(default)]
    taxable: bool,

    #[serde(rename = "listUnitItem", default, deserialize_with = "unit_list_or_empty")]
    units: Vec<Unit>,
}

impl LineItem {
    /// Creates a quantity-1 line from a catalog product. The amount is the
    /// price as listed, unrounded.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog price changes,
    /// this line keeps the original price.
    pub fn from_product(product: &Product) -> Self {
        let unit_price = product.price_or_zero();
        LineItem {
            code: product.code.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            unit: product.unit.clone(),
            quantity: 1,
            unit_price,
            amount: unit_price,
            discount: Money::zero(),
            taxable: false,
            units: Vec::new(),
        }
    }

    /// Creates a quantity-1 line from the price service's answer.
    pub fn from_price_lookup(lookup: &PriceLookup) -> Self {
        let unit = if lookup.quantity_type.is_empty() {
            None
        } else {
            Some(lookup.quantity_type.clone())
        };

        LineItem {
            code: lookup.barcode_id.clone(),
            name: lookup.title.clone(),
            category: String::new(),
            unit,
            quantity: 1,
            unit_price: lookup.amount,
            amount: lookup.amount,
            discount: Money::zero(),
            taxable: false,
            units: lookup.unit_list.clone(),
        }
    }

    /// `round(quantity × unit_price, 2)`, the amount after a quantity update.
    pub fn line_amount(quantity: i64, unit_price: Money) -> Money {
        unit_price.times(quantity).round_2dp()
    }

    /// Returns a copy with a new quantity and a recomputed amount.
    pub(crate) fn with_quantity(&self, quantity: i64) -> Self {
        LineItem {
            quantity,
            amount: Self::line_amount(quantity, self.unit_price),
            ..self.clone()
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price captured at add-time.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Line amount (quantity × unit price, rounded).
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn taxable(&self) -> bool {
        self.taxable
    }

    /// Alternative units the price service offered for this barcode.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
