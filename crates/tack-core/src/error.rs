//! # Error Types
//!
//! Domain-specific error types for tack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tack-core errors (this file)                                          │
//! │  ├── ValidationError  - Malformed input (method names, amount text)     │
//! │  ├── PaymentIssue     - Allocation set does not reconcile (a VALUE,     │
//! │  │                      carried by ValidationOutcome, not thrown)       │
//! │  └── CoreError        - Either of the above, for `?` callers            │
//! │                                                                         │
//! │  tack-checkout errors (separate crate)                                 │
//! │  └── CheckoutError    - Dialog misuse + config failures                 │
//! │                                                                         │
//! │  Flow: ValidationError/PaymentIssue → CheckoutError → Notice → Cashier │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The allocation set does not reconcile with the amount due.
    #[error(transparent)]
    Payment(#[from] PaymentIssue),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Payment Issue
// =============================================================================

/// Why an allocation set cannot be confirmed.
///
/// The `Display` text is exactly what the cashier sees in the notification.
///
/// ## User Workflow
/// ```text
/// Due: $100.00   rows: cash $60.00, card $39.99
///      │
///      ▼
/// validate() → Invalid(TotalMismatch { target: $100.00 })
///      │
///      ▼
/// UI shows: "Payment total must equal $100.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentIssue {
    /// Allocated amounts do not sum to the amount due.
    #[error("Payment total must equal {target}")]
    TotalMismatch { target: Money },

    /// Every row is zero (or negative); nothing would be collected.
    #[error("Please add at least one payment method with an amount greater than 0")]
    NoPositiveAmount,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when raw UI input cannot be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., "12a" as an amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
