//! # Checkout Sessions
//!
//! Holds the carts that are open at the till, one per checkout session.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Store Layout                                 │
//! │                                                                         │
//! │  CartSessions                                                           │
//! │  └── RwLock<HashMap<SessionId, Arc<Mutex<CartSession>>>>               │
//! │         │                                  │                            │
//! │         │ read lock: find the session      │ lock: one writer per cart  │
//! │         │ write lock: open / close only    │                            │
//! │         ▼                                  ▼                            │
//! │  Different sessions never wait on each other beyond the map lookup.    │
//! │  Edits on one session are serialized by its Mutex.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_by_code   ┌──────────┐   checkout    ┌──────────────────┐
//! │  open()  │──────────────►│ In Cart  │──────────────►│ TransactionInvoice│
//! │  empty   │  add_priced    │          │  (success)    │ cart reset empty │
//! └──────────┘  update/remove └────┬─────┘               └──────────────────┘
//!                                  │ clear / close
//!                                  ▼
//!                              (discarded)
//! ```
//!
//! Every edit replaces the session's cart with the new value the engine
//! returns, so a failed strict-mode edit leaves the cart exactly as it was.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use till_core::validation::{
    validate_cart_size, validate_code, validate_price, validate_quantity,
};
use till_core::{
    AddOutcome, Cart, CartTotals, CoreError, Money, PriceLookup, Product, RemoveOutcome,
    TransactionInvoice, UpdateOutcome,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

// =============================================================================
// Session Id
// =============================================================================

/// Identifier of one checkout session (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        SessionId(id)
    }
}

// =============================================================================
// Cart Session
// =============================================================================

/// One open checkout: its cart and when it was last touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    id: SessionId,
    cart: Cart,
    opened_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartSession {
    fn new(id: SessionId, cart: Cart) -> Self {
        let now = Utc::now();
        CartSession {
            id,
            cart,
            opened_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Swaps in the cart an edit produced and returns a copy for the caller.
    fn replace(&mut self, cart: Cart) -> Cart {
        self.cart = cart;
        self.updated_at = Utc::now();
        self.cart.clone()
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// All open checkout sessions of one till.
///
/// ## Usage
/// ```rust
/// use till_core::{Money, Product};
/// use till_session::{CartSessions, SessionConfig};
///
/// let catalog = vec![Product {
///     code: "A1".into(),
///     name: "Soap".into(),
///     category: "Bath".into(),
///     unit: None,
///     description: None,
///     price: Some(Money::from_cents(250)),
/// }];
///
/// let sessions = CartSessions::new(SessionConfig::default());
/// let id = sessions.open().unwrap();
/// sessions.add_by_code(id, &catalog, "a1").unwrap();
/// let cart = sessions.update_quantity(id, 0, 4).unwrap();
/// assert_eq!(cart.subtotal().to_string(), "10.00");
///
/// let invoice = sessions.checkout(id, Money::from_cents(1000)).unwrap();
/// assert_eq!(invoice.list_transaction_items.len(), 1);
/// assert!(sessions.snapshot(id).unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct CartSessions {
    config: SessionConfig,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<CartSession>>>>,
}

impl CartSessions {
    /// Creates an empty store.
    pub fn new(config: SessionConfig) -> Self {
        CartSessions {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Opens a session with an empty cart.
    pub fn open(&self) -> SessionResult<SessionId> {
        self.open_with(Cart::new())
    }

    /// Opens a session seeded with `cart` (e.g. a parked sale).
    pub fn open_with(&self, cart: Cart) -> SessionResult<SessionId> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Poisoned)?;

        let max = self.config.cart.max_open_sessions;
        if sessions.len() >= max {
            warn!(max, "Refusing to open session: limit reached");
            return Err(SessionError::TooManySessions { max });
        }

        let id = SessionId::new();
        let lines = cart.len();
        sessions.insert(id, Arc::new(Mutex::new(CartSession::new(id, cart))));

        info!(session = %id, lines, "Checkout session opened");
        Ok(id)
    }

    /// Closes a session and returns its final cart.
    pub fn close(&self, id: SessionId) -> SessionResult<Cart> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| SessionError::Poisoned)?
            .remove(&id)
            .ok_or(SessionError::NotFound(id))?;

        let session = removed.lock().map_err(|_| SessionError::Poisoned)?;
        info!(session = %id, lines = session.cart.len(), "Checkout session closed");
        Ok(session.cart.clone())
    }

    /// Number of open sessions.
    pub fn len(&self) -> SessionResult<usize> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionError::Poisoned)?
            .len())
    }

    pub fn is_empty(&self) -> SessionResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Ids of all open sessions, in no particular order.
    pub fn ids(&self) -> SessionResult<Vec<SessionId>> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionError::Poisoned)?
            .keys()
            .copied()
            .collect())
    }

    // =========================================================================
    // Lock Helpers
    // =========================================================================

    fn session(&self, id: SessionId) -> SessionResult<Arc<Mutex<CartSession>>> {
        self.sessions
            .read()
            .map_err(|_| SessionError::Poisoned)?
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    /// Runs `f` with read access to one session.
    pub fn with_session<F, R>(&self, id: SessionId, f: F) -> SessionResult<R>
    where
        F: FnOnce(&CartSession) -> R,
    {
        let session = self.session(id)?;
        let guard = session.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(f(&guard))
    }

    /// Runs `f` with exclusive access to one session.
    fn with_session_mut<F, R>(&self, id: SessionId, f: F) -> SessionResult<R>
    where
        F: FnOnce(&mut CartSession) -> SessionResult<R>,
    {
        let session = self.session(id)?;
        let mut guard = session.lock().map_err(|_| SessionError::Poisoned)?;
        f(&mut guard)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Copy of the session's current cart.
    pub fn snapshot(&self, id: SessionId) -> SessionResult<Cart> {
        self.with_session(id, |s| s.cart.clone())
    }

    pub fn totals(&self, id: SessionId) -> SessionResult<CartTotals> {
        self.with_session(id, |s| s.cart.totals())
    }

    // =========================================================================
    // Cart Edits
    // =========================================================================

    /// Adds the catalog product whose code matches `code` (case-insensitive).
    ///
    /// Lenient: an unknown code leaves the cart unchanged. Strict: the code
    /// is trimmed and validated first, and an unknown code is an error.
    pub fn add_by_code(
        &self,
        id: SessionId,
        catalog: &[Product],
        code: &str,
    ) -> SessionResult<Cart> {
        let strict = self.config.is_strict();

        self.with_session_mut(id, |session| {
            let code = if strict {
                let code = validate_code(code)?;
                validate_cart_size(session.cart.len())?;
                if let Some(product) = catalog.iter().find(|p| p.matches_code(code)) {
                    validate_price(product.price_or_zero())?;
                }
                code
            } else {
                code
            };

            let (cart, outcome) = session.cart.checked_add_item_by_code(catalog, code);
            match outcome {
                AddOutcome::Added { index } => {
                    debug!(session = %id, code, index, "Line added");
                }
                AddOutcome::NotFound { code } if strict => {
                    return Err(CoreError::ProductNotFound(code).into());
                }
                AddOutcome::NotFound { .. } => {
                    warn!(session = %id, code, "No product with this code, cart unchanged");
                }
            }
            Ok(session.replace(cart))
        })
    }

    /// Adds a line from the price service's answer for a barcode.
    pub fn add_priced(&self, id: SessionId, lookup: &PriceLookup) -> SessionResult<Cart> {
        let strict = self.config.is_strict();

        self.with_session_mut(id, |session| {
            if strict {
                validate_code(&lookup.barcode_id)?;
                validate_price(lookup.amount)?;
                validate_cart_size(session.cart.len())?;
            }

            let cart = session.cart.add_priced_item(lookup);
            debug!(
                session = %id,
                code = %lookup.barcode_id,
                amount = %lookup.amount,
                "Priced line added"
            );
            Ok(session.replace(cart))
        })
    }

    /// Sets the quantity of line `index` and recomputes its amount.
    ///
    /// Lenient mode applies any quantity, including 0 and negatives.
    pub fn update_quantity(
        &self,
        id: SessionId,
        index: usize,
        quantity: i64,
    ) -> SessionResult<Cart> {
        let strict = self.config.is_strict();

        self.with_session_mut(id, |session| {
            if strict {
                validate_quantity(quantity)?;
            }

            let (cart, outcome) = session.cart.checked_update_quantity(index, quantity);
            match outcome {
                UpdateOutcome::Updated { .. } => {
                    debug!(session = %id, index, quantity, "Quantity updated");
                }
                UpdateOutcome::OutOfRange { index, len } if strict => {
                    return Err(CoreError::LineOutOfRange { index, len }.into());
                }
                UpdateOutcome::OutOfRange { index, len } => {
                    warn!(session = %id, index, len, "Quantity update out of range, cart unchanged");
                }
            }
            Ok(session.replace(cart))
        })
    }

    /// Removes line `index`; later lines shift down by one.
    pub fn remove_item(&self, id: SessionId, index: usize) -> SessionResult<Cart> {
        let strict = self.config.is_strict();

        self.with_session_mut(id, |session| {
            let (cart, outcome) = session.cart.checked_remove_item(index);
            match outcome {
                RemoveOutcome::Removed { index, line } => {
                    debug!(session = %id, index, code = line.code(), "Line removed");
                }
                RemoveOutcome::OutOfRange { index, len } if strict => {
                    return Err(CoreError::LineOutOfRange { index, len }.into());
                }
                RemoveOutcome::OutOfRange { index, len } => {
                    warn!(session = %id, index, len, "Remove out of range, cart unchanged");
                }
            }
            Ok(session.replace(cart))
        })
    }

    /// Empties the cart without closing the session.
    pub fn clear(&self, id: SessionId) -> SessionResult<Cart> {
        self.with_session_mut(id, |session| {
            debug!(session = %id, lines = session.cart.len(), "Cart cleared");
            let cart = session.cart.cleared();
            Ok(session.replace(cart))
        })
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Builds the invoice for the session's cart, dated now.
    pub fn checkout(&self, id: SessionId, pay_amount: Money) -> SessionResult<TransactionInvoice> {
        self.checkout_at(id, pay_amount, Utc::now())
    }

    /// Builds the invoice with an explicit transaction date.
    ///
    /// The cart is reset to empty only when the invoice was built; on any
    /// error it is left untouched. Both modes reject an empty cart and a
    /// payment short of the subtotal.
    pub fn checkout_at(
        &self,
        id: SessionId,
        pay_amount: Money,
        transaction_date: DateTime<Utc>,
    ) -> SessionResult<TransactionInvoice> {
        let account_pos = self.config.account_pos();

        self.with_session_mut(id, |session| {
            let invoice = TransactionInvoice::from_cart(
                &session.cart,
                account_pos,
                pay_amount,
                transaction_date,
            )
            .map_err(|e| {
                warn!(session = %id, error = %e, "Checkout rejected");
                e
            })?;

            let emptied = session.cart.cleared();
            session.replace(emptied);
            info!(
                session = %id,
                account_pos,
                total = %invoice.total_transaction,
                change = %invoice.change_due(),
                items = invoice.list_transaction_items.len(),
                "Checkout complete"
            );
            Ok(invoice)
        })
    }
}

impl Default for CartSessions {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
