//! End-to-end checkout scenarios driven through the public dialog API.

use std::cell::RefCell;
use std::rc::Rc;

use tack_checkout::{
    init_tracing, CheckoutConfig, CheckoutError, ErrorCode, PaymentCompleter, SplitPaymentDialog,
};
use tack_core::{Allocation, Money, PaymentIssue, PaymentMethod, ValidationOutcome};

/// Shares recorded calls with the test after the dialog takes ownership.
#[derive(Clone, Default)]
struct SharedRecorder {
    calls: Rc<RefCell<Vec<Vec<Allocation>>>>,
}

impl PaymentCompleter for SharedRecorder {
    fn complete_payment(&mut self, allocations: &[Allocation]) {
        self.calls.borrow_mut().push(allocations.to_vec());
    }
}

fn dialog_for(target: &str) -> (SplitPaymentDialog<SharedRecorder>, SharedRecorder) {
    init_tracing();

    let recorder = SharedRecorder::default();
    let mut dialog = SplitPaymentDialog::new(CheckoutConfig::default(), recorder.clone());
    let target = Money::parse_decimal(target).unwrap();
    dialog.open(target);
    (dialog, recorder)
}

#[test]
fn exact_split_confirms() {
    let (mut dialog, recorder) = dialog_for("100.00");
    dialog.set_amount_input(0, "60").unwrap();
    assert_eq!(dialog.add_row().unwrap(), PaymentMethod::Card);
    dialog.set_amount_input(1, "40").unwrap();

    let summary = dialog.summary().unwrap();
    assert!(summary.is_valid);
    assert_eq!(summary.remaining, Money::zero());
    assert_eq!(dialog.validate().unwrap(), ValidationOutcome::Valid);

    let confirmed = dialog.confirm().unwrap();
    assert_eq!(
        confirmed.allocations,
        vec![
            Allocation::new(PaymentMethod::Cash, Money::from_cents(6_000)),
            Allocation::new(PaymentMethod::Card, Money::from_cents(4_000)),
        ]
    );
    assert_eq!(*recorder.calls.borrow(), vec![confirmed.allocations]);
    assert!(!dialog.is_open());
}

#[test]
fn one_cent_short_is_rejected() {
    let (mut dialog, recorder) = dialog_for("100.00");
    dialog.set_amount_input(0, "60").unwrap();
    dialog.add_row().unwrap();
    dialog.set_amount_input(1, "39.99").unwrap();

    let summary = dialog.summary().unwrap();
    assert_eq!(summary.remaining, Money::from_cents(1));
    assert_eq!(
        summary.message.as_deref(),
        Some("Payment total must equal $100.00")
    );

    let err = dialog.confirm().unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Rejected(PaymentIssue::TotalMismatch { .. })
    ));

    let notice = err.notice();
    assert_eq!(notice.code, ErrorCode::PaymentError);
    assert_eq!(notice.message, "Payment total must equal $100.00");

    assert!(dialog.is_open());
    assert_eq!(dialog.allocations().unwrap().len(), 2);
    assert!(recorder.calls.borrow().is_empty());
}

#[test]
fn zero_target_needs_a_positive_payment() {
    let (mut dialog, recorder) = dialog_for("0.00");

    let err = dialog.confirm().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please add at least one payment method with an amount greater than 0"
    );
    assert!(dialog.is_open());
    assert!(recorder.calls.borrow().is_empty());
}

#[test]
fn added_row_takes_first_unused_method() {
    let (mut dialog, _) = dialog_for("80.00");
    dialog.set_amount_input(0, "50").unwrap();
    dialog.add_row().unwrap();

    assert_eq!(
        dialog.allocations().unwrap(),
        &[
            Allocation::new(PaymentMethod::Cash, Money::from_cents(5_000)),
            Allocation::empty(PaymentMethod::Card),
        ]
    );
}

#[test]
fn fix_then_confirm_after_rejection() {
    let (mut dialog, recorder) = dialog_for("45.50");
    dialog.set_amount_input(0, "20").unwrap();
    dialog.add_row().unwrap();
    dialog.set_method_input(1, "futures_debt").unwrap();

    assert!(dialog.confirm().is_err());

    assert_eq!(dialog.fill_remaining(1).unwrap(), Money::from_cents(2_550));
    let confirmed = dialog.confirm().unwrap();

    assert_eq!(confirmed.target, Money::from_cents(4_550));
    assert_eq!(confirmed.allocations[1].method, PaymentMethod::FuturesDebt);
    assert_eq!(recorder.calls.borrow().len(), 1);
}

#[test]
fn zero_rows_are_left_out_of_the_payload() {
    let (mut dialog, recorder) = dialog_for("30.00");
    dialog.add_row().unwrap();
    dialog.add_row().unwrap();
    dialog.set_amount_input(1, "30").unwrap();

    dialog.confirm().unwrap();
    assert_eq!(
        *recorder.calls.borrow(),
        vec![vec![Allocation::new(
            PaymentMethod::Card,
            Money::from_cents(3_000)
        )]]
    );
}

#[test]
fn row_rules_are_enforced() {
    let (mut dialog, _) = dialog_for("10.00");

    assert!(matches!(dialog.remove_row(0), Err(CheckoutError::LastRow)));

    dialog.add_row().unwrap();
    dialog.add_row().unwrap();
    let err = dialog.add_row().unwrap_err();
    assert_eq!(err.code(), ErrorCode::RowError);
    assert_eq!(dialog.allocations().unwrap().len(), 3);

    let err = dialog.set_method(2, PaymentMethod::Cash).unwrap_err();
    assert_eq!(err.to_string(), "Cash is already used by another payment row");
}

#[test]
fn cancel_discards_without_completing() {
    let (mut dialog, recorder) = dialog_for("12.00");
    dialog.set_amount_input(0, "12").unwrap();
    dialog.cancel();

    assert!(!dialog.is_open());
    assert!(recorder.calls.borrow().is_empty());

    dialog.open(Money::from_cents(1_200));
    assert_eq!(
        dialog.allocations().unwrap(),
        &[Allocation::empty(PaymentMethod::Cash)]
    );
}

#[test]
fn non_numeric_amount_becomes_zero() {
    let (mut dialog, _) = dialog_for("5.00");
    dialog.set_amount_input(0, "5").unwrap();
    assert_eq!(dialog.set_amount_input(0, "abc").unwrap(), Money::zero());
    assert_eq!(dialog.summary().unwrap().total_allocated, Money::zero());
}

#[test]
fn oversized_amounts_normalize_to_zero() {
    let (mut dialog, recorder) = dialog_for("100.00");
    assert_eq!(
        dialog.set_amount_input(0, "90000000000000000").unwrap(),
        Money::zero()
    );
    dialog.add_row().unwrap();
    assert_eq!(
        dialog.set_amount_input(1, "90000000000000000").unwrap(),
        Money::zero()
    );

    let summary = dialog.summary().unwrap();
    assert_eq!(summary.total_allocated, Money::zero());
    assert!(!summary.is_balanced);

    assert!(dialog.confirm().is_err());
    assert!(recorder.calls.borrow().is_empty());
}

#[test]
fn closure_completer_receives_rows() {
    let mut seen = Vec::new();
    {
        let mut dialog = SplitPaymentDialog::new(CheckoutConfig::default(), |rows: &[Allocation]| {
            seen.push(rows.len());
        });
        dialog.open(Money::from_cents(700));
        dialog.set_amount_input(0, "7").unwrap();
        dialog.confirm().unwrap();
    }
    assert_eq!(seen, vec![1]);
}

#[test]
fn config_from_file_drives_row_cap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkout.toml");
    std::fs::write(&path, "[payments]\nmax_rows = 2\n").unwrap();

    let config = CheckoutConfig::from_file(&path).unwrap();
    let mut dialog = SplitPaymentDialog::new(config, SharedRecorder::default());
    dialog.open(Money::from_cents(100));

    dialog.add_row().unwrap();
    assert!(matches!(
        dialog.add_row(),
        Err(CheckoutError::RowLimitReached { max: 2 })
    ));
}
