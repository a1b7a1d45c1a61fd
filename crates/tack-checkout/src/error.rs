//! # Checkout Error Type
//!
//! Unified error type for dialog operations and configuration loading.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Checkout Dialog                    │
//! │                                                                         │
//! │  dialog.confirm()                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate() ── Invalid(PaymentIssue) ──► CheckoutError::Rejected        │
//! │         │                                        │                      │
//! │         │                                        ▼                      │
//! │         │                              Notice { code, message }         │
//! │         │                                        │                      │
//! │         ▼                                        ▼                      │
//! │  completer.complete_payment()           toast in the frontend          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CheckoutError` is recoverable: the cashier edits the rows or the
//! operator fixes the config file. The dialog never interprets failures of
//! the completion collaborator.

use serde::Serialize;
use tack_core::{CoreError, PaymentIssue, PaymentMethod, ValidationError};
use thiserror::Error;
use ts_rs::TS;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Checkout error type.
#[derive(Debug, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// Operation on a dialog that has no open session.
    #[error("Checkout dialog is not open")]
    NotOpen,

    /// The split already has the configured number of rows.
    #[error("A payment can be split across at most {max} methods")]
    RowLimitReached { max: usize },

    /// Every payment method already has a row.
    #[error("Every payment method is already in use")]
    NoMethodAvailable,

    /// Removing would leave the split without rows.
    #[error("At least one payment method is required")]
    LastRow,

    /// Index does not point at a row.
    #[error("Payment row {index} does not exist")]
    RowNotFound { index: usize },

    /// The chosen method is already on another row.
    #[error("{method} is already used by another payment row")]
    MethodUnavailable { method: PaymentMethod },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// The rows do not reconcile with the amount due.
    #[error(transparent)]
    Rejected(#[from] PaymentIssue),

    /// Raw input could not be turned into a domain value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values out of range.
    #[error("Invalid checkout configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or written.
    #[error("Config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid TOML for `CheckoutConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl From<CoreError> for CheckoutError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Payment(issue) => CheckoutError::Rejected(issue),
            CoreError::Validation(e) => CheckoutError::Validation(e),
        }
    }
}

impl CheckoutError {
    /// Machine-readable code for the frontend.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::NotOpen => ErrorCode::NotOpen,
            CheckoutError::RowLimitReached { .. }
            | CheckoutError::NoMethodAvailable
            | CheckoutError::LastRow
            | CheckoutError::RowNotFound { .. }
            | CheckoutError::MethodUnavailable { .. } => ErrorCode::RowError,
            CheckoutError::Rejected(_) => ErrorCode::PaymentError,
            CheckoutError::Validation(_) => ErrorCode::ValidationError,
            CheckoutError::InvalidConfig(_)
            | CheckoutError::ConfigIo(_)
            | CheckoutError::ConfigParse(_)
            | CheckoutError::ConfigSerialize(_) => ErrorCode::ConfigError,
        }
    }

    /// The transient notification shown to the cashier.
    pub fn notice(&self) -> Notice {
        Notice {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Error codes for notices.
///
/// ## Usage in Frontend
/// ```typescript
/// switch (notice.code) {
///   case 'PAYMENT_ERROR':
///     toast.error(notice.message);
///     break;
///   case 'ROW_ERROR':
///     shakeRow();
///     break;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No open session
    NotOpen,

    /// Row add/remove/method change refused
    RowError,

    /// Split does not reconcile
    PaymentError,

    /// Malformed input
    ValidationError,

    /// Configuration problem
    ConfigError,
}

/// What the frontend receives when a dialog operation is refused:
/// ```json
/// {
///   "code": "PAYMENT_ERROR",
///   "message": "Payment total must equal $100.00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CheckoutError> for Notice {
    fn from(err: &CheckoutError) -> Self {
        err.notice()
    }
}
