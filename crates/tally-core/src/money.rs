//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer amounts in the smallest unit the till uses      │
//! │    unit_price 1000 × quantity 2 = 2000, exactly, every time            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::new(1500);
//! let line = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line.amount(), 4500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare number**: `{"unit_price": 1000}` on the wire
///
/// ## Where Money is Used
/// ```text
/// CartLine.unit_price ──► × quantity ──► TransactionItem.subtotal
///                                              │
///                      Σ subtotals ◄───────────┘
///                           │
///                           ▼
///            Transaction.subtotal_amount - discount = total_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-unit amount.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity, failing on overflow.
    ///
    /// This is the line subtotal rule: `quantity * unit_price`, with no
    /// discount applied.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let line = Money::new(1000).checked_multiply_quantity(2).unwrap();
    /// assert_eq!(line.amount(), 2000);
    /// assert!(Money::new(i64::MAX).checked_multiply_quantity(2).is_err());
    /// ```
    pub fn checked_multiply_quantity(&self, qty: i64) -> CoreResult<Money> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: "line subtotal".to_string(),
            })
    }

    /// Adds two amounts, failing on overflow.
    pub fn checked_add(&self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: "sum".to_string(),
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
