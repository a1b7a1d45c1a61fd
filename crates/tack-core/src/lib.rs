//! # tack-core: Split-Payment Business Logic for Tack POS
//!
//! Pure logic behind the checkout's "split payment" dialog: a cashier divides
//! one amount due across cash, card, bank transfer and deferred payment.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tack POS Checkout                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend                                     │   │
//! │  │    Order summary ──► Split payment dialog ──► Receipt           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tack-checkout                                │   │
//! │  │    SplitPaymentDialog, CheckoutConfig, Notice                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tack-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ allocation │  │ validation│  │   │
//! │  │   │  Payment  │  │   Money   │  │ Allocation │  │  validate │  │   │
//! │  │   │  Method   │  │  parsing  │  │    Set     │  │  summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Payment method registry and the `Allocation` row
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`allocation`] - The per-session row list and its bookkeeping rules
//! - [`validation`] - Totals, balance check and the validation outcome
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tack_core::validation::validate;
//! use tack_core::{AllocationSet, Money, PaymentMethod};
//!
//! let due = Money::from_cents(10_000); // $100.00
//!
//! let mut set = AllocationSet::new(); // [cash $0.00]
//! set.update_payment_amount(0, Money::from_cents(6_000));
//! assert_eq!(set.add_payment_method(), Some(PaymentMethod::Card));
//! set.update_payment_amount(1, Money::from_cents(4_000));
//!
//! assert!(validate(&set, due).is_valid());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::AllocationSet;
pub use error::{CoreError, CoreResult, PaymentIssue, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::{AllocationSummary, ValidationOutcome};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default cap on simultaneous payment rows in the checkout dialog.
///
/// The allocation set itself only stops at one row per method; this is the
/// consumer-side limit, overridable through the checkout configuration.
pub const DEFAULT_MAX_PAYMENT_ROWS: usize = 3;
