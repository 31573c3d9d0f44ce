//! # Telemetry
//!
//! Installs the global `tracing` subscriber for a till process.
//!
//! ## Filter Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RUST_LOG set and valid?  ──yes──►  use RUST_LOG                        │
//! │          │                                                              │
//! │          no                                                             │
//! │          ▼                                                              │
//! │  logging.filter from SessionConfig (default "info")                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Libraries never call this; the binary embedding the session store does,
//! once, at startup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::error::{ConfigError, ConfigResult};

/// Builds the filter from `RUST_LOG`, falling back to `settings.filter`.
pub fn build_filter(settings: &LoggingSettings) -> ConfigResult<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| filter_from(&settings.filter))
}

fn filter_from(directives: &str) -> ConfigResult<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| ConfigError::Invalid(format!("log filter '{}': {}", directives, e)))
}

/// Initializes tracing (logging) for the process.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> ConfigResult<()> {
    let filter = build_filter(settings)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(settings.with_target)
        .try_init()
        .map_err(|e| ConfigError::Telemetry(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_directives() {
        assert!(filter_from("info").is_ok());
        assert!(filter_from("warn,till_session=debug").is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        let settings = LoggingSettings::default();
        let _ = init_tracing(&settings);
        assert!(matches!(
            init_tracing(&settings),
            Err(ConfigError::Telemetry(_))
        ));
    }
}
