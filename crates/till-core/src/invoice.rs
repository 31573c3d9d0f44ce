//! # Invoice Payload
//!
//! Builds the body the invoice service expects when a transaction is
//! finalized. Submitting it is the caller's job.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  Cart ──► TransactionInvoice::from_cart(cart, pos, pay, date)          │
//! │                │                                                        │
//! │                ├── empty cart?        → CoreError::EmptyCart            │
//! │                ├── pay < 0?           → CoreError::Validation           │
//! │                ├── pay < subtotal?    → CoreError::InvalidPaymentAmount │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  POST /Invoice/SaveInvoiceTransaction  (collaborator)                  │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  Cart reset to empty                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```json
//! {
//!   "transactionDate": "2024-05-01T10:15:00Z",
//!   "accountPos": 3,
//!   "totalTransaction": 10.0,
//!   "payAmount": 20.0,
//!   "listTransactionItems": [
//!     { "barcodeId": "A1", "title": "Soap", "quantity": 4, "quantityType": "pcs",
//!       "price": 2.5, "totalPrice": 10.0, "unitList": [] }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, Unit};
use crate::validation::validate_payment;

// =============================================================================
// Invoice Line
// =============================================================================

/// One transaction item as the invoice service expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<i64>,
    pub barcode_id: String,
    pub title: String,
    pub quantity: i64,
    pub quantity_type: String,
    pub price: Money,
    pub total_price: Money,
    #[serde(default)]
    pub unit_list: Vec<Unit>,
}

impl From<&LineItem> for InvoiceLine {
    fn from(line: &LineItem) -> Self {
        InvoiceLine {
            price_id: None,
            barcode_id: line.code().to_string(),
            title: line.name().to_string(),
            quantity: line.quantity(),
            quantity_type: line.unit().unwrap_or_default().to_string(),
            price: line.unit_price(),
            total_price: line.amount(),
            unit_list: line.units().to_vec(),
        }
    }
}

// =============================================================================
// Transaction Invoice
// =============================================================================

/// The request body for saving a finalized transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInvoice {
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
    /// POS account (terminal) the sale is booked against.
    pub account_pos: i64,
    pub total_transaction: Money,
    pub pay_amount: Money,
    pub list_transaction_items: Vec<InvoiceLine>,
}

impl TransactionInvoice {
    /// Builds the invoice for `cart`.
    ///
    /// `total_transaction` is the cart subtotal. The date is passed in so
    /// this stays free of clock reads.
    pub fn from_cart(
        cart: &Cart,
        account_pos: i64,
        pay_amount: Money,
        transaction_date: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        validate_payment(pay_amount)?;

        let total = cart.subtotal();
        if pay_amount < total {
            return Err(CoreError::InvalidPaymentAmount {
                reason: format!("pay amount {} is less than total {}", pay_amount, total),
            });
        }

        Ok(TransactionInvoice {
            transaction_date,
            account_pos,
            total_transaction: total,
            pay_amount,
            list_transaction_items: cart.lines().iter().map(InvoiceLine::from).collect(),
        })
    }

    /// Change owed to the customer.
    pub fn change_due(&self) -> Money {
        (self.pay_amount - self.total_transaction).round_2dp()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
