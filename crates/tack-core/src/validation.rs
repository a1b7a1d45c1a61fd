//! # Validation Module
//!
//! Reconciles a split payment against the amount due.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Split Payment Validation                           │
//! │                                                                         │
//! │  total_allocated = Σ row.amount          (zero/negative rows included) │
//! │  remaining       = target - total_allocated                            │
//! │  is_balanced     = remaining == 0        (exact, integer cents)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ┌──────────────────┐  no   Invalid(TotalMismatch)                      │
//! │  │   is_balanced?   │─────► "Payment total must equal $100.00"          │
//! │  └────────┬─────────┘                                                   │
//! │           │ yes                                                         │
//! │           ▼                                                             │
//! │  ┌──────────────────┐  no   Invalid(NoPositiveAmount)                   │
//! │  │ any row > $0.00? │─────► "Please add at least one payment method     │
//! │  └────────┬─────────┘        with an amount greater than 0"             │
//! │           │ yes                                                         │
//! │           ▼                                                             │
//! │         Valid                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns `Err`: an invalid split is an ordinary
//! [`ValidationOutcome`] the cashier fixes by editing rows.
//!
//! ## Usage
//! ```rust
//! use tack_core::validation::validate;
//! use tack_core::{AllocationSet, Money};
//!
//! let due = Money::from_cents(10_000);
//! let mut set = AllocationSet::new();
//! set.update_payment_amount(0, Money::from_cents(6_000));
//! set.add_payment_method();
//! set.update_payment_amount(1, Money::from_cents(4_000));
//!
//! assert!(validate(&set, due).is_valid());
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::allocation::AllocationSet;
use crate::error::{CoreResult, PaymentIssue, ValidationError};
use crate::money::Money;
use crate::types::PaymentMethod;

/// Result type for input validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Totals
// =============================================================================

/// Sum of every row's amount.
pub fn total_allocated(set: &AllocationSet) -> Money {
    set.total()
}

/// What is still to be allocated. Negative when the rows overpay.
pub fn remaining(set: &AllocationSet, target: Money) -> Money {
    target - total_allocated(set)
}

/// True when the rows sum exactly to `target`. A sum that overflows `i64`
/// is never balanced.
pub fn is_balanced(set: &AllocationSet, target: Money) -> bool {
    set.checked_total() == Some(target)
}

/// Totals snapshot the dialog renders under the payment rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    #[serde(rename = "targetCents")]
    pub target: Money,
    #[serde(rename = "totalAllocatedCents")]
    pub total_allocated: Money,
    #[serde(rename = "remainingCents")]
    pub remaining: Money,
    pub is_balanced: bool,
    pub is_valid: bool,
    /// The message the cashier would get on confirm, if any.
    pub message: Option<String>,
}

/// Computes the totals snapshot for `set` against `target`.
pub fn summarize(set: &AllocationSet, target: Money) -> AllocationSummary {
    let total_allocated = total_allocated(set);
    let remaining = target - total_allocated;
    let outcome = validate(set, target);

    AllocationSummary {
        target,
        total_allocated,
        remaining,
        is_balanced: is_balanced(set, target),
        is_valid: outcome.is_valid(),
        message: outcome.issue().map(|issue| issue.to_string()),
    }
}

// =============================================================================
// Validation Outcome
// =============================================================================

/// Result of reconciling an allocation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "issue", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(PaymentIssue),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// The reason the set was rejected, if it was.
    pub fn issue(&self) -> Option<PaymentIssue> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(issue) => Some(*issue),
        }
    }

    /// Converts to a `Result` for callers that want to use `?`.
    pub fn into_result(self) -> CoreResult<()> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(issue) => Err(issue.into()),
        }
    }
}

/// Validates `set` against the amount due.
///
/// The balance check runs first, so a zero target with all-zero rows is
/// reported as [`PaymentIssue::NoPositiveAmount`].
///
/// ## Example
/// ```rust
/// use tack_core::validation::{validate, ValidationOutcome};
/// use tack_core::{AllocationSet, Money, PaymentIssue};
///
/// let set = AllocationSet::new(); // [cash $0.00]
///
/// assert_eq!(
///     validate(&set, Money::zero()),
///     ValidationOutcome::Invalid(PaymentIssue::NoPositiveAmount),
/// );
/// assert_eq!(
///     validate(&set, Money::from_cents(100)).issue().unwrap().to_string(),
///     "Payment total must equal $1.00",
/// );
/// ```
pub fn validate(set: &AllocationSet, target: Money) -> ValidationOutcome {
    if !is_balanced(set, target) {
        return ValidationOutcome::Invalid(PaymentIssue::TotalMismatch { target });
    }

    if !set.iter().any(|row| row.amount.is_positive()) {
        return ValidationOutcome::Invalid(PaymentIssue::NoPositiveAmount);
    }

    ValidationOutcome::Valid
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a payment method name coming back from a select element.
///
/// ## Rules
/// - Must be one of `cash`, `card`, `bank_transfer`, `futures_debt`
/// - Surrounding whitespace is ignored; case is not
pub fn parse_payment_method(raw: &str) -> ValidationResult<PaymentMethod> {
    raw.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use proptest::prelude::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn set_of(amounts: &[i64]) -> AllocationSet {
        let mut set = AllocationSet::new();
        for (i, amount) in amounts.iter().enumerate() {
            if i > 0 {
                set.add_payment_method();
            }
            set.update_payment_amount(i, cents(*amount));
        }
        set
    }

    #[test]
    fn test_balanced_split_is_valid() {
        let set = set_of(&[6000, 4000]);
        assert_eq!(validate(&set, cents(10_000)), ValidationOutcome::Valid);
        assert_eq!(remaining(&set, cents(10_000)), Money::zero());
    }

    #[test]
    fn test_one_cent_short_is_rejected() {
        let set = set_of(&[6000, 3999]);
        let outcome = validate(&set, cents(10_000));
        assert_eq!(
            outcome,
            ValidationOutcome::Invalid(PaymentIssue::TotalMismatch {
                target: cents(10_000)
            })
        );
        assert_eq!(
            outcome.issue().map(|issue| issue.to_string()),
            Some("Payment total must equal $100.00".to_string())
        );
    }

    #[test]
    fn test_zero_target_with_zero_rows_needs_a_payment() {
        let set = AllocationSet::new();
        let outcome = validate(&set, Money::zero());
        assert_eq!(
            outcome.issue().map(|issue| issue.to_string()),
            Some(
                "Please add at least one payment method with an amount greater than 0".to_string()
            )
        );
    }

    #[test]
    fn test_negative_rows_count_toward_total() {
        // A refund leg offsetting an overpayment still reconciles.
        let set = set_of(&[12_000, -2_000]);
        assert!(validate(&set, cents(10_000)).is_valid());
        assert_eq!(total_allocated(&set), cents(10_000));
    }

    #[test]
    fn test_overpayment_reports_negative_remaining() {
        let set = set_of(&[15_000]);
        assert_eq!(remaining(&set, cents(10_000)), cents(-5_000));
        assert!(!is_balanced(&set, cents(10_000)));
    }

    #[test]
    fn test_overflowing_rows_are_a_mismatch() {
        let mut set = AllocationSet::new();
        set.update_payment_amount(0, cents(i64::MAX));
        set.add_payment_method();
        set.update_payment_amount(1, cents(i64::MAX));
        set.add_payment_method();
        set.update_payment_amount(2, cents(2));

        // Wrapping would make this sum to exactly $0.00.
        let target = Money::zero();
        assert!(!is_balanced(&set, target));
        assert_eq!(
            validate(&set, target),
            ValidationOutcome::Invalid(PaymentIssue::TotalMismatch { target })
        );
        assert!(!summarize(&set, target).is_balanced);
    }

    #[test]
    fn test_summary_reflects_outcome() {
        let summary = summarize(&set_of(&[2500]), cents(4000));
        assert_eq!(summary.total_allocated, cents(2500));
        assert_eq!(summary.remaining, cents(1500));
        assert!(!summary.is_balanced);
        assert!(!summary.is_valid);
        assert_eq!(
            summary.message.as_deref(),
            Some("Payment total must equal $40.00")
        );

        let summary = summarize(&set_of(&[4000]), cents(4000));
        assert!(summary.is_balanced && summary.is_valid);
        assert_eq!(summary.message, None);
    }

    #[test]
    fn test_summary_json_shape() {
        let json = serde_json::to_value(summarize(&set_of(&[100]), cents(300))).unwrap();
        assert_eq!(json["targetCents"], 300);
        assert_eq!(json["totalAllocatedCents"], 100);
        assert_eq!(json["remainingCents"], 200);
        assert_eq!(json["isBalanced"], false);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ValidationOutcome::Valid).unwrap();
        assert_eq!(json["status"], "valid");

        let json = serde_json::to_value(ValidationOutcome::Invalid(
            PaymentIssue::NoPositiveAmount,
        ))
        .unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["issue"]["kind"], "no_positive_amount");
    }

    #[test]
    fn test_outcome_typescript_binding() {
        let decl = ValidationOutcome::decl();
        assert!(decl.contains("status"), "{decl}");
        assert!(decl.contains("PaymentIssue"), "{decl}");
        assert!(PaymentIssue::decl().contains("total_mismatch"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationOutcome::Valid.into_result().is_ok());
        let err = ValidationOutcome::Invalid(PaymentIssue::NoPositiveAmount)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, CoreError::Payment(PaymentIssue::NoPositiveAmount)));
    }

    #[test]
    fn test_parse_payment_method() {
        assert_eq!(parse_payment_method("cash"), Ok(PaymentMethod::Cash));
        assert_eq!(
            parse_payment_method("bank_transfer"),
            Ok(PaymentMethod::BankTransfer)
        );
        assert!(parse_payment_method("paypal").is_err());
        assert!(parse_payment_method("").is_err());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn amounts() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-1_000_000i64..1_000_000, 1..=4)
    }

    proptest! {
        #[test]
        fn prop_balanced_with_positive_row_is_valid(mut rows in amounts(), bump in 1i64..1_000_000) {
            // Guarantee at least one positive row.
            rows[0] = rows[0].abs() + bump;
            let set = set_of(&rows);
            let target = set.total();
            prop_assert!(validate(&set, target).is_valid());
        }

        #[test]
        fn prop_any_mismatch_is_total_mismatch(rows in amounts(), off in prop_oneof![-1_000_000i64..=-1, 1i64..=1_000_000]) {
            let set = set_of(&rows);
            let target = set.total() + cents(off);
            prop_assert_eq!(
                validate(&set, target),
                ValidationOutcome::Invalid(PaymentIssue::TotalMismatch { target })
            );
        }

        #[test]
        fn prop_no_positive_row_is_rejected_when_balanced(rows in prop::collection::vec(-1_000_000i64..=0, 1..=4)) {
            let set = set_of(&rows);
            prop_assert_eq!(
                validate(&set, set.total()),
                ValidationOutcome::Invalid(PaymentIssue::NoPositiveAmount)
            );
        }

        #[test]
        fn prop_fill_remaining_balances(rows in amounts(), target in -1_000_000i64..1_000_000, pick in 0usize..4) {
            let mut set = set_of(&rows);
            let index = pick % set.len();
            set.fill_remaining(index, cents(target));
            prop_assert!(is_balanced(&set, cents(target)));
        }

        #[test]
        fn prop_available_methods_respect_other_rows(edits in prop::collection::vec((0usize..4, 0usize..4), 0..8)) {
            let mut set = AllocationSet::new();
            set.add_payment_method();
            set.add_payment_method();
            for (row, method) in edits {
                let row = row % set.len();
                let offered = set.available_methods(row);
                let pick = offered[method % offered.len()];
                set.update_payment_method(row, pick);
            }

            for i in 0..set.len() {
                let offered = set.available_methods(i);
                let own = set.get(i).map(|row| row.method);
                prop_assert!(own.is_some_and(|m| offered.contains(&m)));
                for (j, row) in set.iter().enumerate() {
                    if j != i {
                        prop_assert!(!offered.contains(&row.method));
                    }
                }
            }
        }

        #[test]
        fn prop_add_never_duplicates(extra_adds in 0usize..8) {
            let mut set = AllocationSet::new();
            for _ in 0..extra_adds {
                set.add_payment_method();
            }
            let mut methods = set.used_methods();
            methods.sort();
            methods.dedup();
            prop_assert_eq!(methods.len(), set.len());
            prop_assert!(set.len() <= PaymentMethod::ALL.len());
        }
    }
}
