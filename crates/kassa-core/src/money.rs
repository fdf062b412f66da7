//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Öre                                              │
//! │    20kr is stored as 2000 öre. All arithmetic is exact integer          │
//! │    arithmetic; the only precision loss is the truncating division in    │
//! │    VAT/discount math, and that loss is explicit and tested.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Non-Negative Invariant
//! Unlike a general ledger, a till never holds a negative amount. `Money`
//! enforces `amount >= 0` at construction and on every subtraction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative monetary value in öre (the minor unit of SEK).
///
/// ## Design Decisions
/// - **i64 storage**: öre amounts fit comfortably; i64 keeps arithmetic
///   uniform with stock counts and CSV-parsed values
/// - **Non-negative invariant**: `new` rejects negatives, `subtract` fails
///   instead of going below zero
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from öre.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Money;
    ///
    /// let price = Money::new(2000).unwrap(); // 20kr
    /// assert_eq!(price.minor_units(), 2000);
    /// assert!(Money::new(-1).is_err());
    /// ```
    pub fn new(minor_units: i64) -> CoreResult<Self> {
        if minor_units < 0 {
            return Err(CoreError::NegativeAmount(minor_units));
        }
        Ok(Money(minor_units))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the value in öre.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds an amount, guarding against i64 overflow.
    ///
    /// Both operands are non-negative, so the result never goes negative;
    /// overflow at öre scale would take quintillions of kronor but is still
    /// surfaced as an error rather than a wrap.
    pub fn add(&self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOutOfRange)
    }

    /// Subtracts an amount.
    ///
    /// ## Errors
    /// Fails with [`CoreError::NegativeAmount`] if the result would go below
    /// zero. A till cannot hand out money it does not hold.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Money;
    ///
    /// let balance = Money::new(2500).unwrap();
    /// let rest = balance.subtract(Money::new(2000).unwrap()).unwrap();
    /// assert_eq!(rest.minor_units(), 500);
    /// assert!(rest.subtract(balance).is_err());
    /// ```
    pub fn subtract(&self, other: Money) -> CoreResult<Money> {
        let result = self.0 - other.0;
        if result < 0 {
            return Err(CoreError::NegativeAmount(result));
        }
        Ok(Money(result))
    }
}

/// Display renders whole kronor, truncating öre: `2050` öre → `"20kr"`.
///
/// This is for receipts and debugging; it mirrors how the till prints
/// amounts on paper.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kr", self.0 / 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(Money::new(-1), Err(CoreError::NegativeAmount(-1))));
        assert!(Money::new(0).is_ok());
        assert!(Money::new(2000).is_ok());
    }

    #[test]
    fn test_add() {
        let a = Money::new(1000).unwrap();
        let b = Money::new(500).unwrap();
        assert_eq!(a.add(b).unwrap().minor_units(), 1500);
    }

    #[test]
    fn test_add_overflow_is_error() {
        let a = Money::new(i64::MAX).unwrap();
        let b = Money::new(1).unwrap();
        assert!(matches!(a.add(b), Err(CoreError::AmountOutOfRange)));
    }

    #[test]
    fn test_subtract() {
        let a = Money::new(1000).unwrap();
        let b = Money::new(400).unwrap();
        assert_eq!(a.subtract(b).unwrap().minor_units(), 600);
    }

    #[test]
    fn test_subtract_below_zero_is_error() {
        let a = Money::new(100).unwrap();
        let b = Money::new(200).unwrap();
        assert!(matches!(a.subtract(b), Err(CoreError::NegativeAmount(_))));
    }

    #[test]
    fn test_display_truncates_to_whole_kronor() {
        assert_eq!(format!("{}", Money::new(2000).unwrap()), "20kr");
        assert_eq!(format!("{}", Money::new(2050).unwrap()), "20kr");
        assert_eq!(format!("{}", Money::zero()), "0kr");
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Money::default().is_zero());
    }
}
