//! # Allocation Set
//!
//! The mutable list of payment rows for one checkout session.
//!
//! ## Row Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Allocation Set Operations                            │
//! │                                                                         │
//! │  Cashier Action           Operation                   Row Change        │
//! │  ──────────────           ─────────                   ──────────        │
//! │                                                                         │
//! │  "+ Add payment" ───────► add_payment_method() ─────► push(first unused)│
//! │                                                                         │
//! │  Type amount ───────────► update_payment_amount() ──► rows[i].amount    │
//! │                                                                         │
//! │  Pick method ───────────► update_payment_method() ──► rows[i].method    │
//! │                                                                         │
//! │  "Pay rest" ────────────► fill_remaining() ─────────► rows[i] balances  │
//! │                                                                         │
//! │  Trash icon ────────────► remove_payment() ─────────► remove(i)         │
//! │                                                                         │
//! │  Close / confirm ───────► reset() ──────────────────► [cash, $0.00]     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - The set never has fewer than one row.
//! - `add_payment_method` never introduces a duplicate method. The other
//!   mutators do not check; the dialog only offers [`AllocationSet::available_methods`].
//! - Amounts are not validated here; see [`crate::validation`].
//!
//! Out-of-range indexes are ignored rather than reported: the rows on
//! screen are the only source of indexes.

use serde::Serialize;

use crate::money::Money;
use crate::types::{Allocation, PaymentMethod};

/// Ordered payment rows of a split payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllocationSet {
    rows: Vec<Allocation>,
}

impl AllocationSet {
    /// Creates the default set: one cash row with nothing allocated.
    pub fn new() -> Self {
        AllocationSet {
            rows: vec![Allocation::default()],
        }
    }

    /// Appends a row for the first method (in registry order) that no row
    /// uses yet, with amount zero.
    ///
    /// Returns the method of the new row, or `None` when every method is
    /// already in use (the set is left unchanged).
    ///
    /// ## Example
    /// ```rust
    /// use tack_core::{AllocationSet, Money, PaymentMethod};
    ///
    /// let mut set = AllocationSet::new();
    /// set.update_payment_amount(0, Money::from_cents(5000));
    ///
    /// assert_eq!(set.add_payment_method(), Some(PaymentMethod::Card));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn add_payment_method(&mut self) -> Option<PaymentMethod> {
        let method = self.unused_methods().next()?;
        self.rows.push(Allocation::empty(method));
        Some(method)
    }

    /// Removes the row at `index` and returns it.
    ///
    /// Does nothing (returns `None`) when only one row is left or `index`
    /// is out of range.
    pub fn remove_payment(&mut self, index: usize) -> Option<Allocation> {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return None;
        }
        Some(self.rows.remove(index))
    }

    /// Replaces the amount of row `index`. No validation.
    pub fn update_payment_amount(&mut self, index: usize, amount: Money) {
        if let Some(row) = self.rows.get_mut(index) {
            row.amount = amount;
        }
    }

    /// Replaces the method of row `index`. Does not check for duplicates.
    pub fn update_payment_method(&mut self, index: usize, method: PaymentMethod) {
        if let Some(row) = self.rows.get_mut(index) {
            row.method = method;
        }
    }

    /// Methods row `exclude_index` may switch to: its own method plus every
    /// method no other row uses, in registry order.
    ///
    /// ## Example
    /// ```rust
    /// use tack_core::{AllocationSet, PaymentMethod};
    ///
    /// let mut set = AllocationSet::new();          // [cash]
    /// set.add_payment_method();                    // [cash, card]
    ///
    /// assert_eq!(
    ///     set.available_methods(1),
    ///     vec![PaymentMethod::Card, PaymentMethod::BankTransfer, PaymentMethod::FuturesDebt],
    /// );
    /// ```
    pub fn available_methods(&self, exclude_index: usize) -> Vec<PaymentMethod> {
        PaymentMethod::ALL
            .into_iter()
            .filter(|method| {
                !self
                    .rows
                    .iter()
                    .enumerate()
                    .any(|(i, row)| i != exclude_index && row.method == *method)
            })
            .collect()
    }

    /// Sets row `index` to whatever amount makes the set sum to `target`.
    ///
    /// The other rows are left alone, so the row may end up zero or
    /// negative when the rest already covers or exceeds the target. The row
    /// is unchanged if no `i64` amount can balance the set.
    pub fn fill_remaining(&mut self, index: usize, target: Money) {
        let others = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .try_fold(Money::zero(), |acc, (_, row)| acc.checked_add(row.amount));

        let amount = others.and_then(|others| target.checked_sub(others));
        if let (Some(row), Some(amount)) = (self.rows.get_mut(index), amount) {
            row.amount = amount;
        }
    }

    /// Back to the single default cash row.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.rows.push(Allocation::default());
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    /// All rows, in entry order.
    pub fn allocations(&self) -> &[Allocation] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Allocation> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Allocation> {
        self.rows.iter()
    }

    /// Number of rows. Never zero.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when every method in the registry has a row.
    pub fn is_full(&self) -> bool {
        self.unused_methods().next().is_none()
    }

    /// Sum of every row, including zero and negative rows. Saturates at the
    /// `i64` bounds.
    pub fn total(&self) -> Money {
        self.rows.iter().map(|row| row.amount).sum()
    }

    /// Exact sum of every row, or `None` if it does not fit in `i64`.
    pub fn checked_total(&self) -> Option<Money> {
        self.rows
            .iter()
            .try_fold(Money::zero(), |acc, row| acc.checked_add(row.amount))
    }

    /// Methods currently on a row, in entry order.
    pub fn used_methods(&self) -> Vec<PaymentMethod> {
        self.rows.iter().map(|row| row.method).collect()
    }

    /// Rows with an amount greater than zero, in entry order.
    ///
    /// This is what gets handed to the payment collaborator on confirm.
    pub fn positive_allocations(&self) -> Vec<Allocation> {
        self.rows
            .iter()
            .filter(|row| row.amount.is_positive())
            .copied()
            .collect()
    }

    fn unused_methods(&self) -> impl Iterator<Item = PaymentMethod> + '_ {
        PaymentMethod::ALL
            .into_iter()
            .filter(move |method| !self.rows.iter().any(|row| row.method == *method))
    }
}

impl Default for AllocationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a AllocationSet {
    type Item = &'a Allocation;
    type IntoIter = std::slice::Iter<'a, Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
