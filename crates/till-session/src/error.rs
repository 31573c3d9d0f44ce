//! # Session Error Types
//!
//! Error types for session and configuration operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Sessions     │  │   Cart / Core   │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Core(..)       │  │  ConfigError::Invalid   │ │
//! │  │  TooManySessions│  │   ProductNotFnd │  │  ConfigError::Io        │ │
//! │  │  Poisoned       │  │   LineOutOfRange│  │  ConfigError::Parse     │ │
//! │  │                 │  │   Validation    │  │  ConfigError::Telemetry │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::{CoreError, ValidationError};

use crate::session::SessionId;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Session Error
// =============================================================================

/// Errors raised by [`CartSessions`](crate::CartSessions).
///
/// In lenient mode only `NotFound`, `TooManySessions`, `Poisoned` and
/// checkout failures reach the caller. Strict mode adds the cart misses and
/// validation failures under `Core`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No open session has this id.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// The configured session limit is reached.
    #[error("Too many open sessions (max {max})")]
    TooManySessions { max: usize },

    /// A thread panicked while holding a session lock.
    #[error("Session state lock poisoned")]
    Poisoned,

    /// Cart engine, validation, or invoice failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Core(CoreError::Validation(err))
    }
}

impl SessionError {
    /// Returns true if the caller can fix this by changing the input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::Core(
                CoreError::ProductNotFound(_)
                    | CoreError::LineOutOfRange { .. }
                    | CoreError::EmptyCart
                    | CoreError::InvalidPaymentAmount { .. }
                    | CoreError::Validation(_)
            )
        )
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading or applying [`SessionConfig`](crate::SessionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The config file could not be read or written.
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The log subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
}
