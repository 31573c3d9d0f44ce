//! # Session Configuration
//!
//! Settings for the checkout session store.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_ACCOUNT_POS=3                                                 │
//! │     TILL_STRICT=true                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     path passed to SessionConfig::load                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     account_pos = 1, lenient mode, log filter "info"                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # till.toml
//! [till]
//! account_pos = 3
//! name = "Register 3"
//!
//! [cart]
//! strict = true
//! max_open_sessions = 8
//!
//! [logging]
//! filter = "info,till_session=debug"
//! ```
//!
//! ## Environment Variables
//! | Variable                 | Field                        |
//! |--------------------------|------------------------------|
//! | `TILL_ACCOUNT_POS`       | `till.account_pos`           |
//! | `TILL_NAME`              | `till.name`                  |
//! | `TILL_STRICT`            | `cart.strict`                |
//! | `TILL_MAX_OPEN_SESSIONS` | `cart.max_open_sessions`     |
//! | `TILL_LOG`               | `logging.filter`             |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Till Settings
// =============================================================================

/// Identity of this till.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TillSettings {
    /// POS account every invoice from this till is booked against.
    #[serde(default = "default_account_pos")]
    pub account_pos: i64,

    /// Human-readable till name (e.g., "Register 1").
    #[serde(default = "default_till_name")]
    pub name: String,
}

fn default_account_pos() -> i64 {
    1
}

fn default_till_name() -> String {
    "Till".to_string()
}

impl Default for TillSettings {
    fn default() -> Self {
        TillSettings {
            account_pos: default_account_pos(),
            name: default_till_name(),
        }
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

/// How sessions treat cart input.
///
/// ## Strict vs Lenient
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Input                    Lenient (default)        Strict               │
/// │  ─────                    ─────────────────        ──────               │
/// │  unknown code             warn!, cart unchanged    Err(ProductNotFound) │
/// │  bad line index           warn!, cart unchanged    Err(LineOutOfRange)  │
/// │  quantity 0 / -2 / 1000   applied as given         Err(Validation)      │
/// │  blank or 51-char code    looked up, no match      Err(Validation)      │
/// │  100th line               appended                 Err(CartFull)        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Reject misses and invalid input instead of ignoring them.
    #[serde(default)]
    pub strict: bool,

    /// Upper bound on concurrently open sessions.
    #[serde(default = "default_max_open_sessions")]
    pub max_open_sessions: usize,
}

fn default_max_open_sessions() -> usize {
    16
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            strict: false,
            max_open_sessions: default_max_open_sessions(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Log output settings. `RUST_LOG` wins over `filter` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Include the module path in each line.
    #[serde(default)]
    pub with_target: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
            with_target: false,
        }
    }
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete session store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub till: TillSettings,

    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl SessionConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. `TILL_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading till config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load till config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes this configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!(?path, "Till config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.till.account_pos <= 0 {
            return Err(ConfigError::Invalid(format!(
                "account_pos must be positive, got {}",
                self.till.account_pos
            )));
        }

        if self.cart.max_open_sessions == 0 {
            return Err(ConfigError::Invalid(
                "max_open_sessions must be greater than 0".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `TILL_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and skipped.
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var("TILL_ACCOUNT_POS") {
            match value.trim().parse::<i64>() {
                Ok(pos) => {
                    debug!(account_pos = pos, "Overriding account_pos from environment");
                    self.till.account_pos = pos;
                }
                Err(_) => warn!(value = %value, "Ignoring non-numeric TILL_ACCOUNT_POS"),
            }
        }

        if let Some(name) = var("TILL_NAME") {
            self.till.name = name;
        }

        if let Some(value) = var("TILL_STRICT") {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.strict = true,
                "0" | "false" | "no" | "off" => self.cart.strict = false,
                _ => warn!(value = %value, "Unknown TILL_STRICT value"),
            }
        }

        if let Some(value) = var("TILL_MAX_OPEN_SESSIONS") {
            match value.trim().parse::<usize>() {
                Ok(max) => self.cart.max_open_sessions = max,
                Err(_) => warn!(value = %value, "Ignoring non-numeric TILL_MAX_OPEN_SESSIONS"),
            }
        }

        if let Some(filter) = var("TILL_LOG") {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.logging.filter = filter;
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the POS account id.
    pub fn account_pos(&self) -> i64 {
        self.till.account_pos
    }

    /// Returns true if sessions run in strict mode.
    pub fn is_strict(&self) -> bool {
        self.cart.strict
    }

    /// Returns a copy with strict mode set.
    pub fn strict(mut self, strict: bool) -> Self {
        self.cart.strict = strict;
        self
    }
}
