//! # tack-checkout: Split Payment Dialog
//!
//! Consumer side of the split-payment flow. Owns the dialog state, enforces
//! the row rules, and hands confirmed allocations to the collaborator that
//! records the sale.
//!
//! ## Module Organization
//! ```text
//! tack_checkout/
//! ├── lib.rs          ◄─── You are here (exports & logging setup)
//! ├── dialog.rs       ◄─── SplitPaymentDialog and its session
//! ├── completer.rs    ◄─── PaymentCompleter seam
//! ├── config.rs       ◄─── CheckoutConfig (TOML + env)
//! ├── input.rs        ◄─── Raw amount field normalization
//! └── error.rs        ◄─── CheckoutError and frontend notices
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  cashier input ──► SplitPaymentDialog ──► tack_core::AllocationSet      │
//! │                          │                                              │
//! │                          │ confirm()                                    │
//! │                          ▼                                              │
//! │                 tack_core::validation::validate                         │
//! │                    │                  │                                 │
//! │                    ▼                  ▼                                 │
//! │            Notice (toast)     PaymentCompleter                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod completer;
pub mod config;
pub mod dialog;
pub mod error;
pub mod input;

use tracing_subscriber::EnvFilter;

pub use completer::PaymentCompleter;
pub use config::{CheckoutConfig, DisplaySettings, PaymentSettings};
pub use dialog::{CheckoutSession, ConfirmedPayment, SplitPaymentDialog};
pub use error::{CheckoutError, CheckoutResult, ErrorCode, Notice};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every dialog operation
/// - `RUST_LOG=tack_checkout=trace` - Trace for this crate only
/// - Default: INFO level
///
/// Calling it again, or after the host installed its own subscriber, is a
/// no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
