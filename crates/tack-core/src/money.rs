//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Two payment rows in floating point:                                    │
//! │    0.10 + 0.20 = 0.30000000000000004  ❌ "not balanced" against 0.30    │
//! │                                                                         │
//! │  The usual patch is an epsilon:  |remaining| < 0.01                     │
//! │    which also accepts 99.995 as "balanced"                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 20 = 30 cents, compared with ==                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tack_core::money::Money;
//!
//! let cash = Money::from_cents(6010);  // $60.10
//! let card = Money::from_cents(3990);  // $39.90
//! assert_eq!(cash + card, Money::from_major_minor(100, 0));
//!
//! // Raw cashier input is parsed from its decimal text, never via f64
//! let typed = Money::parse_decimal("$1,250.5").unwrap();
//! assert_eq!(typed.cents(), 125_050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::PaymentMethod;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values; a split-payment row may carry
///   a negative amount (refund leg) and the remaining balance goes negative
///   on overpayment
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows in Checkout
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Order total ──► target ───────────────┐                                │
/// │                                        ▼                                │
/// │  Cashier types "60.10" ──► Allocation.amount ──► total_allocated        │
/// │                                        │                                │
/// │                                        ▼                                │
/// │                           remaining = target - total                    │
/// │                                        │                                │
/// │                                        ▼                                │
/// │                     "Payment total must equal $100.00"                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude [`Money::parse_decimal`] accepts.
    ///
    /// One row per payment method at this size still sums without leaving
    /// `i64`.
    pub const MAX_INPUT: Money = Money(i64::MAX / PaymentMethod::ALL.len() as i64);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tack_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use tack_core::money::Money;
    ///
    /// let due = Money::from_major_minor(100, 0); // $100.00
    /// assert_eq!(due.cents(), 10_000);
    ///
    /// let refund = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(refund.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use tack_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Adds, returning `None` on `i64` overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts, returning `None` on `i64` overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a decimal amount as typed by a cashier.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "12"        → 1200        "$12.50"     → 1250
    /// "12.5"      → 1250        "1,200.00"   → 120000
    /// ".75"       → 75          "-$3.10"     → -310
    /// "0.125"     → 13   (more than two decimals: round half away from zero)
    /// ```
    ///
    /// Commas are only accepted as thousands separators in the whole part
    /// ("1,234,567"); "1,2,3" is rejected.
    ///
    /// ## Errors
    /// - [`ValidationError::Required`] for empty input
    /// - [`ValidationError::InvalidFormat`] for anything that is not a plain
    ///   decimal number, or whose magnitude exceeds [`Money::MAX_INPUT`]
    ///
    /// ## Example
    /// ```rust
    /// use tack_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("39.99").unwrap().cents(), 3999);
    /// assert!(Money::parse_decimal("forty").is_err());
    /// assert!(Money::parse_decimal("").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

        if unsigned.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (grouped, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let whole = strip_thousands_separators(grouped)
            .ok_or_else(|| invalid_amount("has misplaced thousands separators"))?;

        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !is_digits(whole.as_str())
            || !is_digits(fraction)
        {
            return Err(invalid_amount("must be a decimal number"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(|| invalid_amount("is too large"))?
        };

        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().is_some_and(|d| d >= 5);

        let magnitude = whole_cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .filter(|cents| *cents <= Money::MAX_INPUT.0)
            .ok_or_else(|| invalid_amount("is too large"))?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }
}

/// Removes thousands separators from the whole part of an amount.
///
/// Returns `None` unless every comma starts a group of exactly three digits
/// and the leading group has one to three characters.
fn strip_thousands_separators(whole: &str) -> Option<String> {
    if !whole.contains(',') {
        return Some(whole.to_string());
    }

    let mut groups = whole.split(',');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 {
        return None;
    }

    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn invalid_amount(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Operators saturate at the `i64` bounds; use `checked_add`/`checked_sub`
// where an exact result matters.

/// Renders as `$<dollars>.<cents>`, the format used in validation messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
