//! # Membership Module
//!
//! Point-driven membership tiers.
//!
//! ## Tier Ladder
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Employee (15% discount)  - employment overrides points entirely        │
//! │  Gold     (10% discount)  - points >= 10_000_000 (100_000kr spent)      │
//! │  Silver   ( 5% discount)  - points >= 2_500_000  (25_000kr spent)       │
//! │  Bronze   ( 0% discount)  - everyone else                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Member points are öre-correlated: a purchase worth 400kr (40_000 öre)
//! earns 40_000 points. The tier is recomputed on every points or
//! employment change, never cached stale.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::{GOLD_THRESHOLD, SILVER_THRESHOLD};

// =============================================================================
// Membership Tier
// =============================================================================

/// The discount bracket a member currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    Employee,
    Gold,
    Silver,
    Bronze,
}

impl MembershipTier {
    /// Returns the discount percentage this tier grants.
    #[inline]
    pub const fn discount_percent(&self) -> i64 {
        match self {
            MembershipTier::Employee => 15,
            MembershipTier::Gold => 10,
            MembershipTier::Silver => 5,
            MembershipTier::Bronze => 0,
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MembershipTier::Employee => "Employee",
            MembershipTier::Gold => "Gold",
            MembershipTier::Silver => "Silver",
            MembershipTier::Bronze => "Bronze",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// Membership
// =============================================================================

/// A customer's membership: start date, points, and the derived tier.
///
/// Age eligibility is checked where the customer joins (the customer owns
/// the personal number); this type only tracks points and employment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    start_date: NaiveDate,
    points: i64,
    employee: bool,
    tier: MembershipTier,
}

impl Membership {
    /// Creates a membership with an initial points balance.
    ///
    /// ## Errors
    /// [`CoreError::NegativeAmount`] if `initial_points` is negative.
    pub fn new(start_date: NaiveDate, initial_points: i64, employee: bool) -> CoreResult<Self> {
        if initial_points < 0 {
            return Err(CoreError::NegativeAmount(initial_points));
        }
        let mut membership = Membership {
            start_date,
            points: initial_points,
            employee,
            tier: MembershipTier::Bronze,
        };
        membership.recompute_tier();
        Ok(membership)
    }

    /// Adds points earned by a purchase.
    ///
    /// ## Errors
    /// [`CoreError::NegativeAmount`] for a negative delta; points only
    /// ever accumulate.
    pub fn add_points(&mut self, points: i64) -> CoreResult<()> {
        if points < 0 {
            return Err(CoreError::NegativeAmount(points));
        }
        self.points += points;
        self.recompute_tier();
        Ok(())
    }

    /// Updates the employment flag.
    pub fn set_employment_status(&mut self, employed: bool) {
        self.employee = employed;
        self.recompute_tier();
    }

    /// Employment disregards points entirely: millions of points still
    /// rank below the employee discount.
    fn recompute_tier(&mut self) {
        self.tier = if self.employee {
            MembershipTier::Employee
        } else if self.points >= GOLD_THRESHOLD {
            MembershipTier::Gold
        } else if self.points >= SILVER_THRESHOLD {
            MembershipTier::Silver
        } else {
            MembershipTier::Bronze
        };
    }

    #[inline]
    pub fn tier(&self) -> MembershipTier {
        self.tier
    }

    #[inline]
    pub fn discount_percent(&self) -> i64 {
        self.tier.discount_percent()
    }

    #[inline]
    pub fn points(&self) -> i64 {
        self.points
    }

    #[inline]
    pub fn is_employee(&self) -> bool {
        self.employee
    }

    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
