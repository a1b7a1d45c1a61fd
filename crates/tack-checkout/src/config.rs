//! # Checkout Configuration
//!
//! Consumer-side settings for the split-payment dialog.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TACK_MAX_PAYMENT_ROWS=2                                            │
//! │     TACK_CURRENCY_SYMBOL=€                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tack-pos/checkout.toml (Linux)                           │
//! │     ~/Library/Application Support/com.tack.pos/checkout.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     max_rows = 3, currency_symbol = "$"                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [payments]
//! max_rows = 3
//!
//! [display]
//! currency_symbol = "$"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tack_core::{Money, PaymentMethod, DEFAULT_MAX_PAYMENT_ROWS};
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, CheckoutResult};

// =============================================================================
// Payment Settings
// =============================================================================

/// Split-payment rules applied by the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Maximum simultaneous payment rows (1 to the number of methods).
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_PAYMENT_ROWS
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            max_rows: default_max_rows(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Currency symbol used when rendering amounts in the dialog.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Checkout Config
// =============================================================================

/// Complete checkout dialog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub payments: PaymentSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default location)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CheckoutResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
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
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> CheckoutResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CheckoutResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CheckoutError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CheckoutResult<()> {
        let methods = PaymentMethod::ALL.len();
        if self.payments.max_rows == 0 || self.payments.max_rows > methods {
            return Err(CheckoutError::InvalidConfig(format!(
                "payments.max_rows must be between 1 and {}, got {}",
                methods, self.payments.max_rows
            )));
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(CheckoutError::InvalidConfig(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rows) = lookup("TACK_MAX_PAYMENT_ROWS") {
            match rows.trim().parse::<usize>() {
                Ok(max_rows) => {
                    debug!(max_rows, "Overriding max payment rows from environment");
                    self.payments.max_rows = max_rows;
                }
                Err(_) => warn!(value = %rows, "Ignoring non-numeric TACK_MAX_PAYMENT_ROWS"),
            }
        }

        if let Some(symbol) = lookup("TACK_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tack", "pos")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Maximum simultaneous payment rows.
    pub fn max_rows(&self) -> usize {
        self.payments.max_rows
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use tack_checkout::CheckoutConfig;
    /// use tack_core::Money;
    ///
    /// let config = CheckoutConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(-1234)), "-$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.display.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}
