//! Raw field input from the payment rows.

use tack_core::Money;
use tracing::debug;

/// Turns whatever the amount field holds into cents.
///
/// Empty or non-numeric text becomes zero, so a half-typed field never
/// blocks the rest of the dialog; the validation message tells the
/// cashier what is still missing.
///
/// ## Example
/// ```rust
/// use tack_checkout::input::normalize_amount_input;
///
/// assert_eq!(normalize_amount_input("39.99").cents(), 3999);
/// assert_eq!(normalize_amount_input("").cents(), 0);
/// assert_eq!(normalize_amount_input("abc").cents(), 0);
/// ```
pub fn normalize_amount_input(raw: &str) -> Money {
    match Money::parse_decimal(raw) {
        Ok(amount) => amount,
        Err(err) => {
            debug!(input = %raw, error = %err, "Amount input normalized to zero");
            Money::zero()
        }
    }
}
