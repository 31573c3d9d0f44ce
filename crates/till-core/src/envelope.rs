//! # Response Envelopes
//!
//! The remote product/unit/transaction/invoice service wraps every answer in
//! a `{ data, message }` envelope. This module models that shape and how a
//! status code decides what the caller sees. It never performs a request.
//!
//! ## Status Partition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP status          ResponseClass        What the caller gets         │
//! │  ───────────          ─────────────        ────────────────────         │
//! │  200..=299     ──►    Success       ──►    Ok(data)  (None if null)     │
//! │  404           ──►    NotFound      ──►    Ok(None)  absence, no error  │
//! │  anything else ──►    Failure       ──►    Err(CoreError::Remote)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use till_core::envelope::catalog_from_response;
//!
//! let body = r#"{"data":[{"code":"A1","name":"Soap","category":"Bath","price":2.5}]}"#;
//! let catalog = catalog_from_response(200, body).unwrap();
//! assert_eq!(catalog.len(), 1);
//!
//! // 404 means "nothing there", not an error
//! assert!(catalog_from_response(404, "").unwrap().is_empty());
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;

// =============================================================================
// Resources
// =============================================================================

/// Resource roots of the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Auth,
    Employee,
    Price,
    Product,
    Role,
    Transaction,
    Unit,
    Invoice,
}

impl Resource {
    /// Path segment, e.g. `/Product`.
    pub const fn path(&self) -> &'static str {
        match self {
            Resource::Auth => "/Auth",
            Resource::Employee => "/Employee",
            Resource::Price => "/Price",
            Resource::Product => "/Product",
            Resource::Role => "/Role",
            Resource::Transaction => "/Transaction",
            Resource::Unit => "/Unit",
            Resource::Invoice => "/Invoice",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// Response Class
// =============================================================================

/// How a status code is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    NotFound,
    Failure,
}

impl ResponseClass {
    pub const fn from_status(status: u16) -> Self {
        match status {
            200..=299 => ResponseClass::Success,
            404 => ResponseClass::NotFound,
            _ => ResponseClass::Failure,
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// `{ data: T | null, message?: string }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn with_data(data: T) -> Self {
        ApiEnvelope {
            data: Some(data),
            message: None,
        }
    }

    /// Applies the status partition.
    ///
    /// A failure carries the envelope's message, or a generic one naming the
    /// status when the server sent none.
    pub fn resolve(self, status: u16) -> CoreResult<Option<T>> {
        match ResponseClass::from_status(status) {
            ResponseClass::Success => Ok(self.data),
            ResponseClass::NotFound => Ok(None),
            ResponseClass::Failure => Err(CoreError::Remote {
                status,
                message: self
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("request failed with status: {}", status)),
            }),
        }
    }
}

/// Decodes a response body and applies the status partition.
///
/// A 404 is absence whatever the body holds. A failure whose body is not an
/// envelope still reports the status.
pub fn decode_response<T>(status: u16, body: &str) -> CoreResult<Option<T>>
where
    T: DeserializeOwned,
{
    match ResponseClass::from_status(status) {
        ResponseClass::NotFound => Ok(None),
        ResponseClass::Success => serde_json::from_str::<ApiEnvelope<T>>(body)?.resolve(status),
        ResponseClass::Failure => {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
                .ok()
                .and_then(|envelope| envelope.message);
            ApiEnvelope::<T> {
                data: None,
                message,
            }
            .resolve(status)
        }
    }
}

/// Decodes a product listing into a catalog snapshot for the cart engine.
///
/// Null data and 404 both give an empty catalog.
pub fn catalog_from_response(status: u16, body: &str) -> CoreResult<Vec<Product>> {
    Ok(decode_response::<Vec<Product>>(status, body)?.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{PriceLookup, Unit};

    #[test]
    fn test_status_partition() {
        assert_eq!(ResponseClass::from_status(200), ResponseClass::Success);
        assert_eq!(ResponseClass::from_status(204), ResponseClass::Success);
        assert_eq!(ResponseClass::from_status(404), ResponseClass::NotFound);
        assert_eq!(ResponseClass::from_status(400), ResponseClass::Failure);
        assert_eq!(ResponseClass::from_status(500), ResponseClass::Failure);
        assert_eq!(ResponseClass::from_status(504), ResponseClass::Failure);
        assert_eq!(ResponseClass::from_status(301), ResponseClass::Failure);
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Product.path(), "/Product");
        assert_eq!(Resource::Invoice.to_string(), "/Invoice");
    }

    #[test]
    fn test_resolve_success_and_not_found() {
        let envelope = ApiEnvelope::with_data(5);
        assert_eq!(envelope.clone().resolve(200), Ok(Some(5)));
        assert_eq!(envelope.resolve(404), Ok(None));
    }

    #[test]
    fn test_resolve_failure_uses_message() {
        let envelope: ApiEnvelope<i32> = ApiEnvelope {
            data: None,
            message: Some("Barcode is required".to_string()),
        };
        assert_eq!(
            envelope.resolve(400),
            Err(CoreError::Remote {
                status: 400,
                message: "Barcode is required".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_failure_without_message() {
        let envelope: ApiEnvelope<i32> = ApiEnvelope {
            data: None,
            message: None,
        };
        assert_eq!(
            envelope.resolve(503),
            Err(CoreError::Remote {
                status: 503,
                message: "request failed with status: 503".to_string()
            })
        );
    }

    #[test]
    fn test_catalog_from_response() {
        let body = r#"{
            "data": [
                {"code": "A1", "name": "Soap", "category": "Bath", "price": 2.5},
                {"barcodeId": "B2", "title": "Milk", "quantityType": "box", "amount": 1.25}
            ],
            "message": "ok"
        }"#;

        let catalog = catalog_from_response(200, body).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].price, Some(Money::from_cents(250)));
        assert_eq!(catalog[1].code, "B2");
        assert_eq!(catalog[1].unit.as_deref(), Some("box"));
    }

    #[test]
    fn test_catalog_null_data_is_empty() {
        assert!(catalog_from_response(200, r#"{"data": null}"#)
            .unwrap()
            .is_empty());
        assert!(catalog_from_response(200, r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_catalog_404_ignores_body() {
        assert!(catalog_from_response(404, "<html>Not Found</html>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_catalog_malformed_success_body() {
        let err = catalog_from_response(200, "<html>").unwrap_err();
        assert!(matches!(err, CoreError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_failure_with_non_json_body_keeps_status() {
        let err = catalog_from_response(502, "Bad Gateway").unwrap_err();
        assert_eq!(
            err,
            CoreError::Remote {
                status: 502,
                message: "request failed with status: 502".to_string()
            }
        );
    }

    #[test]
    fn test_failure_with_envelope_message() {
        let err = catalog_from_response(500, r#"{"data":null,"message":"Database offline"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::Remote {
                status: 500,
                message: "Database offline".to_string()
            }
        );
    }

    #[test]
    fn test_decode_price_lookup() {
        let body = r#"{"data":{"priceId":3,"barcodeId":"B2","title":"Milk","quantityType":"box",
            "amount":1.25,"unitList":[{"id":1,"name":"box"},{"id":2,"name":"pcs"}]}}"#;

        let lookup = decode_response::<PriceLookup>(200, body).unwrap().unwrap();
        assert_eq!(lookup.price_id, Some(3));
        assert_eq!(
            lookup.unit_list[1],
            Unit {
                id: Some(2),
                name: "pcs".to_string()
            }
        );
    }

    #[test]
    fn test_missing_data_decodes_as_none() {
        let lookup = decode_response::<PriceLookup>(200, r#"{"message":"no price"}"#).unwrap();
        assert_eq!(lookup, None);
    }

    #[test]
    fn test_decode_unit_dropdown() {
        let body = r#"{"data":[{"id":1,"name":"pcs"},{"id":2,"name":"kg"}]}"#;
        let units = decode_response::<Vec<Unit>>(200, body).unwrap().unwrap();
        assert_eq!(units.len(), 2);
    }
}
