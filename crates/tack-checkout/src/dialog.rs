//! # Split Payment Dialog
//!
//! Owns the allocation rows of one checkout while the dialog is open.
//!
//! ## Dialog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Split Payment Dialog                                 │
//! │                                                                         │
//! │  ┌──────────┐  open(target)   ┌──────────────────────────────┐          │
//! │  │  Closed  │────────────────►│  Open                        │          │
//! │  │          │                 │  rows = [cash $0.00]         │          │
//! │  └──────────┘                 │                              │          │
//! │       ▲  ▲                    │  add_row / remove_row        │          │
//! │       │  │                    │  set_amount_input            │          │
//! │       │  │  cancel / close    │  set_method / fill_remaining │          │
//! │       │  └────────────────────│                              │          │
//! │       │                       └──────────────┬───────────────┘          │
//! │       │                                      │ confirm()                │
//! │       │                                      ▼                          │
//! │       │                          validate(rows, target)                 │
//! │       │                           │                    │                │
//! │       │                   Invalid │                    │ Valid          │
//! │       │                           ▼                    ▼                │
//! │       │              Err(Rejected(issue))   completer.complete_payment  │
//! │       │              dialog stays open      (rows with amount > 0)      │
//! │       │                                                │                │
//! │       └────────────────────────────────────────────────┘                │
//! │                         session discarded                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consumer-Side Rules
//! The allocation set accepts anything; the dialog adds:
//! - at most `payments.max_rows` rows (configurable, default 3)
//! - never fewer than one row
//! - a row may only switch to a method no other row uses
//! - raw amount text is normalized (non-numeric → $0.00) before it lands
//!
//! Single-threaded by construction: every mutation takes `&mut self` and
//! the session lives exactly as long as the dialog is open.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tack_core::validation::{self, AllocationSummary, ValidationOutcome};
use tack_core::{Allocation, AllocationSet, Money, PaymentMethod};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::completer::PaymentCompleter;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::input::normalize_amount_input;

// =============================================================================
// Session
// =============================================================================

/// State of one open dialog.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    id: Uuid,
    target: Money,
    allocations: AllocationSet,
    opened_at: DateTime<Utc>,
}

impl CheckoutSession {
    fn new(target: Money) -> Self {
        CheckoutSession {
            id: Uuid::new_v4(),
            target,
            allocations: AllocationSet::new(),
            opened_at: Utc::now(),
        }
    }

    /// Correlation id for logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Amount due. Fixed for the lifetime of the session.
    pub fn target(&self) -> Money {
        self.target
    }

    pub fn allocations(&self) -> &AllocationSet {
        &self.allocations
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    fn check_row(&self, index: usize) -> CheckoutResult<()> {
        if index < self.allocations.len() {
            Ok(())
        } else {
            Err(CheckoutError::RowNotFound { index })
        }
    }
}

/// Returned by a successful [`SplitPaymentDialog::confirm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedPayment {
    #[ts(type = "string")]
    pub session_id: Uuid,
    #[serde(rename = "targetCents")]
    pub target: Money,
    /// Exactly what the completer received.
    pub allocations: Vec<Allocation>,
}

// =============================================================================
// Dialog
// =============================================================================

/// The split-payment dialog of the checkout screen.
///
/// ## Usage
/// ```rust
/// use tack_checkout::{CheckoutConfig, SplitPaymentDialog};
/// use tack_core::{Allocation, Money, PaymentMethod};
///
/// let mut dialog = SplitPaymentDialog::new(CheckoutConfig::default(), |_: &[Allocation]| {});
/// dialog.open(Money::from_cents(10_000));
///
/// dialog.set_amount_input(0, "60").unwrap();
/// assert_eq!(dialog.add_row().unwrap(), PaymentMethod::Card);
/// dialog.set_amount_input(1, "40").unwrap();
///
/// let confirmed = dialog.confirm().unwrap();
/// assert_eq!(confirmed.allocations.len(), 2);
/// assert!(!dialog.is_open());
/// ```
#[derive(Debug)]
pub struct SplitPaymentDialog<C> {
    config: CheckoutConfig,
    completer: C,
    session: Option<CheckoutSession>,
}

impl<C: PaymentCompleter> SplitPaymentDialog<C> {
    /// Creates a closed dialog.
    pub fn new(config: CheckoutConfig, completer: C) -> Self {
        SplitPaymentDialog {
            config,
            completer,
            session: None,
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn completer(&self) -> &C {
        &self.completer
    }

    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Opens the dialog for `target` with a single `cash $0.00` row.
    ///
    /// Opening an already open dialog discards the previous rows.
    pub fn open(&mut self, target: Money) {
        if let Some(previous) = self.session.take() {
            warn!(session_id = %previous.id, "Checkout dialog reopened, discarding previous session");
        }

        let session = CheckoutSession::new(target);
        info!(session_id = %session.id, target = %target, "Checkout dialog opened");
        self.session = Some(session);
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CheckoutSession> {
        self.session.as_ref()
    }

    /// Closes without completing the payment. Does nothing if already closed.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            info!(session_id = %session.id, "Checkout dialog closed");
        }
    }

    /// Cashier backed out; same as [`close`](Self::close).
    pub fn cancel(&mut self) {
        if let Some(session) = &self.session {
            debug!(session_id = %session.id, rows = session.allocations.len(), "Split payment cancelled");
        }
        self.close();
    }

    // =========================================================================
    // Read Views
    // =========================================================================

    pub fn target(&self) -> CheckoutResult<Money> {
        Ok(self.current()?.target)
    }

    pub fn allocations(&self) -> CheckoutResult<&[Allocation]> {
        Ok(self.current()?.allocations.allocations())
    }

    /// Totals for the footer of the dialog.
    pub fn summary(&self) -> CheckoutResult<AllocationSummary> {
        let session = self.current()?;
        Ok(validation::summarize(&session.allocations, session.target))
    }

    pub fn validate(&self) -> CheckoutResult<ValidationOutcome> {
        let session = self.current()?;
        Ok(validation::validate(&session.allocations, session.target))
    }

    /// Options for the method selector of row `index`.
    pub fn available_methods(&self, index: usize) -> CheckoutResult<Vec<PaymentMethod>> {
        let session = self.current()?;
        session.check_row(index)?;
        Ok(session.allocations.available_methods(index))
    }

    /// Whether the "+ Add payment" control should be enabled.
    pub fn can_add_row(&self) -> bool {
        self.session.as_ref().is_some_and(|session| {
            session.allocations.len() < self.config.max_rows() && !session.allocations.is_full()
        })
    }

    /// Whether row delete controls should be enabled.
    pub fn can_remove_row(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.allocations.len() > 1)
    }

    // =========================================================================
    // Row Operations
    // =========================================================================

    /// Adds a row for the first unused method.
    pub fn add_row(&mut self) -> CheckoutResult<PaymentMethod> {
        let max = self.config.max_rows();
        let session = self.current_mut()?;
        debug!(session_id = %session.id, "add_row");

        if session.allocations.len() >= max {
            warn!(session_id = %session.id, max, "Payment row limit reached");
            return Err(CheckoutError::RowLimitReached { max });
        }

        session
            .allocations
            .add_payment_method()
            .ok_or(CheckoutError::NoMethodAvailable)
    }

    /// Removes row `index`. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, index: usize) -> CheckoutResult<Allocation> {
        let session = self.current_mut()?;
        debug!(session_id = %session.id, index, "remove_row");

        session.check_row(index)?;
        if session.allocations.len() == 1 {
            warn!(session_id = %session.id, "Refusing to remove the last payment row");
            return Err(CheckoutError::LastRow);
        }

        session
            .allocations
            .remove_payment(index)
            .ok_or(CheckoutError::RowNotFound { index })
    }

    /// Sets the amount of row `index`. Any amount is accepted; validation
    /// happens on confirm.
    pub fn set_amount(&mut self, index: usize, amount: Money) -> CheckoutResult<()> {
        let session = self.current_mut()?;
        debug!(session_id = %session.id, index, amount = %amount, "set_amount");

        session.check_row(index)?;
        session.allocations.update_payment_amount(index, amount);
        Ok(())
    }

    /// Sets the amount of row `index` from the raw field text and returns
    /// the amount that was stored.
    pub fn set_amount_input(&mut self, index: usize, raw: &str) -> CheckoutResult<Money> {
        let amount = normalize_amount_input(raw);
        self.set_amount(index, amount)?;
        Ok(amount)
    }

    /// Switches row `index` to `method`, which must not be on another row.
    pub fn set_method(&mut self, index: usize, method: PaymentMethod) -> CheckoutResult<()> {
        let session = self.current_mut()?;
        debug!(session_id = %session.id, index, method = method.as_str(), "set_method");

        session.check_row(index)?;
        if !session.allocations.available_methods(index).contains(&method) {
            warn!(session_id = %session.id, method = method.as_str(), "Payment method already in use");
            return Err(CheckoutError::MethodUnavailable { method });
        }

        session.allocations.update_payment_method(index, method);
        Ok(())
    }

    /// Switches row `index` to the method named by a select value.
    pub fn set_method_input(&mut self, index: usize, raw: &str) -> CheckoutResult<PaymentMethod> {
        let method = validation::parse_payment_method(raw)?;
        self.set_method(index, method)?;
        Ok(method)
    }

    /// Puts whatever is still due on row `index` and returns its new amount.
    pub fn fill_remaining(&mut self, index: usize) -> CheckoutResult<Money> {
        let session = self.current_mut()?;
        debug!(session_id = %session.id, index, "fill_remaining");

        session.check_row(index)?;
        session.allocations.fill_remaining(index, session.target);
        Ok(session
            .allocations
            .get(index)
            .map(|row| row.amount)
            .unwrap_or_default())
    }

    // =========================================================================
    // Confirm
    // =========================================================================

    /// Completes the split payment.
    ///
    /// ## Behavior
    /// - Invalid rows: returns `Rejected(issue)`, the completer is not
    ///   called, rows and open state are kept so the cashier can fix them
    /// - Valid rows: the completer receives the rows with amount > 0, then
    ///   the session is discarded and the dialog closes
    pub fn confirm(&mut self) -> CheckoutResult<ConfirmedPayment> {
        let session = self.current()?;
        debug!(session_id = %session.id, "confirm");

        if let ValidationOutcome::Invalid(issue) =
            validation::validate(&session.allocations, session.target)
        {
            warn!(session_id = %session.id, issue = %issue, "Split payment rejected");
            return Err(CheckoutError::Rejected(issue));
        }

        let confirmed = ConfirmedPayment {
            session_id: session.id,
            target: session.target,
            allocations: session.allocations.positive_allocations(),
        };

        self.completer.complete_payment(&confirmed.allocations);
        self.session = None;

        info!(
            session_id = %confirmed.session_id,
            target = %confirmed.target,
            methods = confirmed.allocations.len(),
            "Split payment confirmed"
        );

        Ok(confirmed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn current(&self) -> CheckoutResult<&CheckoutSession> {
        self.session.as_ref().ok_or(CheckoutError::NotOpen)
    }

    fn current_mut(&mut self) -> CheckoutResult<&mut CheckoutSession> {
        self.session.as_mut().ok_or(CheckoutError::NotOpen)
    }
}
