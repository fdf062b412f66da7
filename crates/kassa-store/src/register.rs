//! # Cash Register
//!
//! The register's money drawer, backed by a single plain-text file.
//!
//! ## File Format
//! One non-negative base-10 integer (öre) on the first line, or an empty
//! file for a zero balance. The file is rewritten wholesale on every
//! payment; last write wins. There is no locking discipline, which is
//! acceptable only because one process drives one till.

use std::fs;
use std::path::{Path, PathBuf};

use kassa_core::cash::change_for;
use kassa_core::{Denomination, Money, Wallet};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Cash Register
// =============================================================================

/// The till's balance, loaded from and persisted to a text file.
#[derive(Debug)]
pub struct CashRegister {
    path: PathBuf,
    balance: Money,
}

impl CashRegister {
    /// Opens the register against an existing balance file.
    ///
    /// ## Errors
    /// - [`StoreError::Io`] if the file is missing or unreadable
    /// - [`StoreError::MalformedBalance`] if the content is not a number
    /// - [`StoreError::NegativeBalance`] if the stored number is negative
    ///
    /// An empty file reads as a zero balance: a brand-new till starts with
    /// an empty drawer, not a missing one.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        let trimmed = content.trim();

        let balance = if trimmed.is_empty() {
            Money::zero()
        } else {
            let raw: i64 = trimmed
                .parse()
                .map_err(|_| StoreError::MalformedBalance {
                    content: trimmed.to_string(),
                })?;
            if raw < 0 {
                return Err(StoreError::NegativeBalance { balance: raw });
            }
            Money::new(raw)?
        };

        debug!(path = %path.display(), balance = balance.minor_units(), "opened register");
        Ok(CashRegister { path, balance })
    }

    /// The current in-memory balance.
    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Records a card payment: balance grows by `amount`, file rewritten.
    ///
    /// ## Example
    /// With the file containing `200000`, paying 25_000 öre by card leaves
    /// the balance at 225_000 and the file containing `225000`.
    pub fn pay_by_card(&mut self, amount: Money) -> StoreResult<()> {
        self.balance = self.balance.add(amount)?;
        self.persist()?;
        info!(
            amount = amount.minor_units(),
            balance = self.balance.minor_units(),
            "card payment recorded"
        );
        Ok(())
    }

    /// Records a cash payment and returns the change to hand back.
    ///
    /// The drawer keeps the cost and the customer gets
    /// `wallet.total() - cost` back, broken into bills and coins by the
    /// greedy change calculator. Paying exactly returns an empty map.
    ///
    /// ## Errors
    /// [`StoreError::InsufficientCash`] when the wallet does not cover
    /// the cost; the balance and the file stay untouched.
    pub fn pay_by_cash(
        &mut self,
        wallet: &Wallet,
        cost: Money,
    ) -> StoreResult<BTreeMap<Denomination, u32>> {
        let offered = wallet.total()?;
        if offered < cost {
            return Err(StoreError::InsufficientCash {
                offered: offered.minor_units(),
                cost: cost.minor_units(),
            });
        }

        let change = change_for(offered.subtract(cost)?)?;

        self.balance = self.balance.add(cost)?;
        self.persist()?;
        info!(
            cost = cost.minor_units(),
            offered = offered.minor_units(),
            balance = self.balance.minor_units(),
            "cash payment recorded"
        );
        Ok(change)
    }

    /// Rewrites the whole balance file with the current balance.
    fn persist(&self) -> StoreResult<()> {
        fs::write(&self.path, self.balance.minor_units().to_string())?;
        debug!(path = %self.path.display(), "balance file rewritten");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
