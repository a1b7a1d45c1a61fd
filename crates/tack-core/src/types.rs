//! # Domain Types
//!
//! Payment instruments and the allocation rows a split payment is made of.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentMethod   │   │ PaymentMethod   │   │   Allocation    │       │
//! │  │  ─────────────  │   │     Info        │   │  ─────────────  │       │
//! │  │  Cash           │──►│  ─────────────  │   │  method         │       │
//! │  │  Card           │   │  label          │   │  amount (Money) │       │
//! │  │  BankTransfer   │   │  icon           │   └─────────────────┘       │
//! │  │  FuturesDebt    │   │  color          │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// A payment instrument the cashier can put part of the total on.
///
/// The set is closed; `ALL` lists it in the order used when picking the
/// next unused method for a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash at the register.
    Cash,
    /// Card on the external terminal.
    Card,
    /// Bank transfer (paid against the invoice reference).
    BankTransfer,
    /// Deferred payment, booked as a receivable on the client account.
    FuturesDebt,
}

impl PaymentMethod {
    /// Every method, in registry order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::FuturesDebt,
    ];

    /// Returns the display metadata for this method.
    pub fn info(self) -> &'static PaymentMethodInfo {
        match self {
            PaymentMethod::Cash => &REGISTRY[0],
            PaymentMethod::Card => &REGISTRY[1],
            PaymentMethod::BankTransfer => &REGISTRY[2],
            PaymentMethod::FuturesDebt => &REGISTRY[3],
        }
    }

    /// Human-readable label ("Bank Transfer").
    #[inline]
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Wire literal ("bank_transfer"), as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::FuturesDebt => "futures_debt",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts exactly the four wire literals.
///
/// ## Example
/// ```rust
/// use tack_core::PaymentMethod;
///
/// assert_eq!("futures_debt".parse::<PaymentMethod>().unwrap(), PaymentMethod::FuturesDebt);
/// assert!("cheque".parse::<PaymentMethod>().is_err());
/// ```
impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == raw)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|method| method.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Payment Method Registry
// =============================================================================

/// Display metadata for a payment method.
///
/// `icon` and `color` are tags the frontend maps to its icon set and theme
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentMethodInfo {
    pub method: PaymentMethod,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

static REGISTRY: [PaymentMethodInfo; 4] = [
    PaymentMethodInfo {
        method: PaymentMethod::Cash,
        label: "Cash",
        icon: "banknote",
        color: "green",
    },
    PaymentMethodInfo {
        method: PaymentMethod::Card,
        label: "Card",
        icon: "credit-card",
        color: "blue",
    },
    PaymentMethodInfo {
        method: PaymentMethod::BankTransfer,
        label: "Bank Transfer",
        icon: "building-bank",
        color: "purple",
    },
    PaymentMethodInfo {
        method: PaymentMethod::FuturesDebt,
        label: "Futures Debt",
        icon: "clock",
        color: "orange",
    },
];

/// Returns the full registry, in registry order.
pub fn payment_methods() -> &'static [PaymentMethodInfo] {
    &REGISTRY
}

// =============================================================================
// Allocation
// =============================================================================

/// One row of a split payment: an amount put on one payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub method: PaymentMethod,
    /// Amount in cents. May be zero or negative while the cashier is editing.
    #[serde(rename = "amountCents")]
    pub amount: Money,
}

impl Allocation {
    /// Creates an allocation row.
    #[inline]
    pub const fn new(method: PaymentMethod, amount: Money) -> Self {
        Allocation { method, amount }
    }

    /// A fresh row for `method` with nothing allocated yet.
    #[inline]
    pub const fn empty(method: PaymentMethod) -> Self {
        Allocation::new(method, Money::zero())
    }
}

impl Default for Allocation {
    fn default() -> Self {
        Allocation::empty(PaymentMethod::Cash)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
