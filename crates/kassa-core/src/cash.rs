//! # Cash Module
//!
//! Physical bills and coins: the fixed denomination set, wallets of cash
//! handed over at the till, and the change calculator.
//!
//! ## Change Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cash Payment Flow                                 │
//! │                                                                         │
//! │  Customer hands over Wallet (e.g. 100kr + 100kr + 50kr = 25_000 öre)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  wallet.total() - cost = amount owed back                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  change_for(owed) ← greedy largest-first breakdown                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {20kr bill: 1}  (for 2_000 öre owed)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Greedy Optimality Caveat
//! The greedy algorithm minimizes the bill/coin count **only because this
//! denomination set is canonical** (each face value fits evenly into the
//! progression). It is not a guarantee that generalizes to arbitrary sets;
//! do not reuse `change_for` with a different set without revisiting this.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Denomination
// =============================================================================

/// One of the fixed bill/coin face values, in öre.
///
/// The set covers the 1 öre coin up to the 1000kr bill. Constructing from
/// any other value fails, so a `Denomination` is valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Denomination {
    OneOre,
    OneKrona,
    TwoKronor,
    FiveKronor,
    TenKronor,
    TwentyKronor,
    FiftyKronor,
    HundredKronor,
    TwoHundredKronor,
    FiveHundredKronor,
    ThousandKronor,
}

impl Denomination {
    /// Every denomination, largest face value first.
    ///
    /// The change calculator iterates this order; keep it descending.
    pub const DESCENDING: [Denomination; 11] = [
        Denomination::ThousandKronor,
        Denomination::FiveHundredKronor,
        Denomination::TwoHundredKronor,
        Denomination::HundredKronor,
        Denomination::FiftyKronor,
        Denomination::TwentyKronor,
        Denomination::TenKronor,
        Denomination::FiveKronor,
        Denomination::TwoKronor,
        Denomination::OneKrona,
        Denomination::OneOre,
    ];

    /// Returns the face value in öre.
    #[inline]
    pub const fn value(&self) -> i64 {
        match self {
            Denomination::OneOre => 1,
            Denomination::OneKrona => 100,
            Denomination::TwoKronor => 200,
            Denomination::FiveKronor => 500,
            Denomination::TenKronor => 1_000,
            Denomination::TwentyKronor => 2_000,
            Denomination::FiftyKronor => 5_000,
            Denomination::HundredKronor => 10_000,
            Denomination::TwoHundredKronor => 20_000,
            Denomination::FiveHundredKronor => 50_000,
            Denomination::ThousandKronor => 100_000,
        }
    }

    /// Looks up the denomination with the given face value in öre.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Denomination;
    ///
    /// let bill = Denomination::from_value(10_000).unwrap();
    /// assert_eq!(bill.value(), 10_000);
    /// assert!(Denomination::from_value(7).is_err());
    /// ```
    pub fn from_value(minor_units: i64) -> CoreResult<Self> {
        Self::DESCENDING
            .iter()
            .copied()
            .find(|d| d.value() == minor_units)
            .ok_or(CoreError::InvalidDenomination(minor_units))
    }
}

/// Prints the denomination as whole kronor, matching receipt formatting.
impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kr", self.value() / 100)
    }
}

// =============================================================================
// Change Calculator
// =============================================================================

/// Breaks `amount` into bills and coins, largest first.
///
/// ## Algorithm
/// Iterate denominations in descending order; for each, take
/// `amount ÷ face value` (integer division) pieces and reduce the
/// remainder. Zero counts are omitted, so an amount of 0 returns an
/// empty map.
///
/// ## Errors
/// - [`CoreError::UnrepresentableAmount`] if a remainder survives the
///   smallest denomination. With the canonical set ending at 1 öre this
///   cannot happen, but the error path must exist: the calculator is
///   handed amounts, not proofs.
/// - [`CoreError::AmountOutOfRange`] if a single denomination would need
///   more than `u32::MAX` pieces. No drawer holds four billion bills;
///   refusing beats handing back a silently wrapped count.
///
/// ## Example
/// ```rust
/// use kassa_core::cash::change_for;
/// use kassa_core::{Denomination, Money};
///
/// let change = change_for(Money::new(2_000).unwrap()).unwrap();
/// assert_eq!(change.get(&Denomination::TwentyKronor), Some(&1));
/// assert_eq!(change.len(), 1);
/// ```
pub fn change_for(amount: Money) -> CoreResult<BTreeMap<Denomination, u32>> {
    let mut remaining = amount.minor_units();
    let mut breakdown = BTreeMap::new();

    for denomination in Denomination::DESCENDING {
        let count = remaining / denomination.value();
        if count > 0 {
            let pieces = u32::try_from(count).map_err(|_| CoreError::AmountOutOfRange)?;
            breakdown.insert(denomination, pieces);
            remaining -= count * denomination.value();
        }
        if remaining == 0 {
            break;
        }
    }

    if remaining != 0 {
        return Err(CoreError::UnrepresentableAmount { remainder: remaining });
    }
    Ok(breakdown)
}

// =============================================================================
// Wallet
// =============================================================================

/// A handful of physical cash offered as payment.
///
/// A plain multiset of denominations. The till only ever needs the total
/// and never inspects individual pieces, but modeling the pieces keeps the
/// payment API honest: you cannot pay with an amount that does not exist
/// as bills and coins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pieces: Vec<Denomination>,
}

impl Wallet {
    /// Creates an empty wallet.
    pub fn new() -> Self {
        Wallet { pieces: Vec::new() }
    }

    /// Adds one bill or coin.
    pub fn add(&mut self, denomination: Denomination) {
        self.pieces.push(denomination);
    }

    /// Total value of all pieces.
    ///
    /// ## Errors
    /// [`CoreError::AmountOutOfRange`] if the sum overflows. A wallet that
    /// large cannot physically exist, but the arithmetic stays checked like
    /// everywhere else in the crate.
    pub fn total(&self) -> CoreResult<Money> {
        self.pieces
            .iter()
            .try_fold(Money::zero(), |sum, piece| {
                sum.add(Money::new(piece.value())?)
            })
    }

    /// Number of bills and coins in the wallet.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Checks if the wallet holds no cash.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl FromIterator<Denomination> for Wallet {
    fn from_iter<I: IntoIterator<Item = Denomination>>(iter: I) -> Self {
        Wallet {
            pieces: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denomination_round_trip() {
        for denomination in Denomination::DESCENDING {
            let rebuilt = Denomination::from_value(denomination.value()).unwrap();
            assert_eq!(rebuilt, denomination);
        }
    }

    #[test]
    fn test_invalid_denomination_is_rejected() {
        for invalid in [7, -100, 0, 150, 1_000_000] {
            assert!(matches!(
                Denomination::from_value(invalid),
                Err(CoreError::InvalidDenomination(v)) if v == invalid
            ));
        }
    }

    #[test]
    fn test_denomination_display() {
        assert_eq!(Denomination::TenKronor.to_string(), "10kr");
        assert_eq!(Denomination::ThousandKronor.to_string(), "1000kr");
    }

    #[test]
    fn test_change_for_zero_is_empty() {
        let change = change_for(Money::zero()).unwrap();
        assert!(change.is_empty());
    }

    #[test]
    fn test_change_for_single_bill() {
        let change = change_for(Money::new(2_000).unwrap()).unwrap();
        assert_eq!(change.get(&Denomination::TwentyKronor), Some(&1));
        assert_eq!(change.len(), 1);
    }

    #[test]
    fn test_change_is_minimal_for_canonical_set() {
        // 78kr = 50 + 20 + 5 + 2 + 1
        let change = change_for(Money::new(7_800).unwrap()).unwrap();
        assert_eq!(change.get(&Denomination::FiftyKronor), Some(&1));
        assert_eq!(change.get(&Denomination::TwentyKronor), Some(&1));
        assert_eq!(change.get(&Denomination::FiveKronor), Some(&1));
        assert_eq!(change.get(&Denomination::TwoKronor), Some(&1));
        assert_eq!(change.get(&Denomination::OneKrona), Some(&1));
        assert_eq!(change.len(), 5);
    }

    #[test]
    fn test_change_count_beyond_u32_is_an_error() {
        // One öre past 2^32 thousand-kronor bills; the count of the
        // largest denomination no longer fits a u32.
        let amount = Denomination::ThousandKronor.value() * (u32::MAX as i64 + 1);
        assert!(matches!(
            change_for(Money::new(amount).unwrap()),
            Err(CoreError::AmountOutOfRange)
        ));
    }

    #[test]
    fn test_change_count_at_u32_max_still_works() {
        let amount = Denomination::ThousandKronor.value() * u32::MAX as i64;
        let change = change_for(Money::new(amount).unwrap()).unwrap();
        assert_eq!(
            change.get(&Denomination::ThousandKronor),
            Some(&u32::MAX)
        );
        assert_eq!(change.len(), 1);
    }

    #[test]
    fn test_change_sums_back_to_amount() {
        for amount in [1, 99, 100, 387_65, 2_500_00, 123_456_78] {
            let change = change_for(Money::new(amount).unwrap()).unwrap();
            let sum: i64 = change
                .iter()
                .map(|(d, count)| d.value() * *count as i64)
                .sum();
            assert_eq!(sum, amount, "breakdown of {amount} does not sum back");
        }
    }

    #[test]
    fn test_wallet_total() {
        let wallet: Wallet = [
            Denomination::HundredKronor,
            Denomination::HundredKronor,
            Denomination::FiftyKronor,
        ]
        .into_iter()
        .collect();

        assert_eq!(wallet.total().unwrap().minor_units(), 25_000);
        assert_eq!(wallet.piece_count(), 3);
    }

    #[test]
    fn test_empty_wallet() {
        let wallet = Wallet::new();
        assert!(wallet.is_empty());
        assert!(wallet.total().unwrap().is_zero());
    }
}
