//! # till-session: Checkout Session Store for Till
//!
//! Owns the carts that are open at the till and applies the cart engine from
//! `till-core` to them, one writer per cart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till Architecture                                │
//! │                                                                         │
//! │  Checkout UI / host process                                            │
//! │        │  open · add_by_code · update_quantity · remove_item · checkout │
//! │        ▼                                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ★ till-session (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐   ┌────────────┐   ┌──────────────────────┐   │   │
//! │  │   │  session   │   │   config   │   │     telemetry        │   │   │
//! │  │   │CartSessions│   │SessionConf │   │ init_tracing         │   │   │
//! │  │   │ SessionId  │   │ TOML + env │   │ EnvFilter / RUST_LOG │   │   │
//! │  │   └─────┬──────┘   └────────────┘   └──────────────────────┘   │   │
//! │  └─────────┼───────────────────────────────────────────────────────┘   │
//! │            ▼                                                            │
//! │  till-core: Cart, validation, TransactionInvoice (pure)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! ```rust,no_run
//! use till_session::{telemetry, CartSessions, SessionConfig};
//!
//! let config = SessionConfig::load_or_default(Some("till.toml".into()));
//! telemetry::init_tracing(&config.logging).ok();
//! let sessions = CartSessions::new(config);
//! let _id = sessions.open();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{CartSettings, LoggingSettings, SessionConfig, TillSettings};
pub use error::{ConfigError, ConfigResult, SessionError, SessionResult};
pub use session::{CartSession, CartSessions, SessionId};
