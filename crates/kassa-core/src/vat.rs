//! # VAT Categories
//!
//! The Swedish VAT brackets used by the till:
//! - 25% standard rate (most goods, alcohol above 3.5 ABV)
//! - 12% for provisions and food
//! - 6% for books and newspapers
//! - 0% for untaxed items

use serde::{Deserialize, Serialize};

// =============================================================================
// VAT Rate
// =============================================================================

/// A VAT category with its fixed percentage.
///
/// Tested indirectly through the product price math; the enum itself is
/// just a tag-to-percentage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRate {
    /// 25% - the standard rate.
    Standard,
    /// 12% - provisions and food.
    Food,
    /// 6% - books, newspapers.
    Reduced,
    /// 0% - untaxed.
    NoTax,
}

impl VatRate {
    /// Returns the VAT percentage for this category.
    #[inline]
    pub const fn percent(&self) -> i64 {
        match self {
            VatRate::Standard => 25,
            VatRate::Food => 12,
            VatRate::Reduced => 6,
            VatRate::NoTax => 0,
        }
    }

    /// Parses the token used in inventory CSV files.
    ///
    /// Accepts `"VAT.STANDARD"`, `"VAT.FOOD"` and `"VAT.REDUCED"`; any other
    /// token maps to [`VatRate::NoTax`]. Unknown tokens are not an error so
    /// a hand-edited inventory file still loads.
    pub fn from_csv_token(token: &str) -> Self {
        match token.trim() {
            "VAT.STANDARD" => VatRate::Standard,
            "VAT.FOOD" => VatRate::Food,
            "VAT.REDUCED" => VatRate::Reduced,
            _ => VatRate::NoTax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
