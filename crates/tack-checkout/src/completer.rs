//! # Payment Completion
//!
//! The seam between the dialog and whatever records the sale.
//!
//! ```text
//! SplitPaymentDialog::confirm()
//!      │  rows with amount > $0.00
//!      ▼
//! PaymentCompleter::complete_payment(&[Allocation])   ◄── order system,
//!                                                         payment API, ...
//! ```
//!
//! The dialog calls the completer exactly once per successful confirmation
//! and never inspects what it does. Durability and retries belong to the
//! implementation.

use tack_core::Allocation;

/// Receives the finalized allocations of a confirmed split payment.
pub trait PaymentCompleter {
    fn complete_payment(&mut self, allocations: &[Allocation]);
}

/// Any `FnMut(&[Allocation])` closure is a completer.
///
/// ```rust
/// use tack_checkout::{CheckoutConfig, SplitPaymentDialog};
/// use tack_core::{Allocation, Money};
///
/// let mut recorded = Vec::new();
/// let mut dialog = SplitPaymentDialog::new(CheckoutConfig::default(), |rows: &[Allocation]| {
///     recorded.extend_from_slice(rows);
/// });
///
/// dialog.open(Money::from_cents(1500));
/// dialog.set_amount_input(0, "15").unwrap();
/// dialog.confirm().unwrap();
/// drop(dialog);
///
/// assert_eq!(recorded.len(), 1);
/// ```
impl<F> PaymentCompleter for F
where
    F: FnMut(&[Allocation]),
{
    fn complete_payment(&mut self, allocations: &[Allocation]) {
        self(allocations)
    }
}
