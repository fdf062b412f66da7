//! # Product Module
//!
//! Sellable items and their price math.
//!
//! ## Price Math at a Glance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price 2000 öre, Food VAT (12%), 10% discount                           │
//! │                                                                         │
//! │  price_with_vat()              = 2000 * 112 / 100          = 2240       │
//! │  vat_amount()                  = 2240 - 2000               =  240       │
//! │  price_with_vat_and_discount() = 2240 * 90 / 100           = 2016       │
//! │  discount_amount()             = 2240 - 2016               =  224       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All divisions truncate. Fractional öre are discarded on purpose; the
//! purchase accumulator reverses every increment with the identical formula,
//! so the books always balance within a purchase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::validation::{validate_discount_percent, validate_price, validate_stock_amount};
use crate::vat::VatRate;

// =============================================================================
// Product Key
// =============================================================================

/// Composite identity key for a product: brand plus product name.
///
/// The key is explicit rather than derived from hashing the product, so
/// inventory lookups never depend on which non-identity fields happen to
/// be equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductKey {
    pub brand: String,
    pub name: String,
}

impl ProductKey {
    pub fn new(brand: impl Into<String>, name: impl Into<String>) -> Self {
        ProductKey {
            brand: brand.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.name)
    }
}

// =============================================================================
// Product Config
// =============================================================================

/// Everything needed to construct a [`Product`].
///
/// Plays the role of a builder: collect the fields, then let
/// [`Product::new`] validate the lot in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub brand: String,
    pub name: String,
    /// Price in öre, WITHOUT VAT. A 20kr banana is entered as 2000.
    pub price: i64,
    pub vat: VatRate,
    /// Discount percentage, 0 to 100. 0 means no discount.
    pub discount_percent: i64,
    /// Units on the shelf.
    pub stock: i64,
    /// Best-before date, if the product has one.
    pub expires_on: Option<NaiveDate>,
}

// =============================================================================
// Product
// =============================================================================

/// A sellable item.
///
/// Treated as immutable as possible: after construction only the stock
/// count and the discount may change. Identity (brand + name) never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    key: ProductKey,
    price: i64,
    vat: VatRate,
    discount_percent: i64,
    stock: i64,
    expires_on: Option<NaiveDate>,
}

impl Product {
    /// Validates the config and builds the product.
    ///
    /// ## Rules
    /// - brand and name must be non-empty
    /// - price must be positive
    /// - discount must be 0..=100
    /// - stock must be non-negative
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::{Product, ProductConfig, VatRate};
    ///
    /// let milk = Product::new(ProductConfig {
    ///     brand: "Arla".to_string(),
    ///     name: "Mellanmjölk".to_string(),
    ///     price: 2000,
    ///     vat: VatRate::Food,
    ///     discount_percent: 0,
    ///     stock: 5,
    ///     expires_on: None,
    /// })
    /// .unwrap();
    /// assert_eq!(milk.price(), 2000);
    /// ```
    pub fn new(config: ProductConfig) -> CoreResult<Self> {
        use crate::error::ValidationError;

        if config.brand.trim().is_empty() {
            return Err(ValidationError::Required { field: "brand" }.into());
        }
        if config.name.trim().is_empty() {
            return Err(ValidationError::Required { field: "name" }.into());
        }
        validate_price(config.price)?;
        validate_discount_percent(config.discount_percent)?;
        validate_stock_amount(config.stock)?;

        Ok(Product {
            key: ProductKey::new(config.brand, config.name),
            price: config.price,
            vat: config.vat,
            discount_percent: config.discount_percent,
            stock: config.stock,
            expires_on: config.expires_on,
        })
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    #[inline]
    pub fn key(&self) -> &ProductKey {
        &self.key
    }

    #[inline]
    pub fn brand(&self) -> &str {
        &self.key.brand
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.key.name
    }

    // -------------------------------------------------------------------------
    // Price Math
    // -------------------------------------------------------------------------

    /// Price in öre, without VAT.
    #[inline]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Total price including VAT.
    ///
    /// A banana priced 2000 öre with 12% VAT comes out at 2240.
    pub fn price_with_vat(&self) -> i64 {
        self.price * (100 + self.vat.percent()) / 100
    }

    /// The VAT portion of the price with VAT.
    ///
    /// For the 2240 öre banana this is 240.
    pub fn vat_amount(&self) -> i64 {
        self.price_with_vat() - self.price
    }

    /// Price with VAT and the discount applied.
    ///
    /// The 2240 öre banana at 10% off comes out at 2016.
    pub fn price_with_vat_and_discount(&self) -> i64 {
        self.price_with_vat() * (100 - self.discount_percent) / 100
    }

    /// The amount knocked off the price with VAT by the discount.
    ///
    /// For the 2240 öre banana at 10% off this is 224.
    pub fn discount_amount(&self) -> i64 {
        self.price_with_vat() - self.price_with_vat_and_discount()
    }

    // -------------------------------------------------------------------------
    // Mutable State: discount and stock
    // -------------------------------------------------------------------------

    #[inline]
    pub fn vat(&self) -> VatRate {
        self.vat
    }

    #[inline]
    pub fn discount_percent(&self) -> i64 {
        self.discount_percent
    }

    #[inline]
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0
    }

    /// Changes the discount percentage.
    pub fn set_discount_percent(&mut self, discount_percent: i64) -> CoreResult<()> {
        validate_discount_percent(discount_percent)?;
        self.discount_percent = discount_percent;
        Ok(())
    }

    /// Units currently on the shelf.
    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Replaces the stock count. Rejects negative counts.
    pub fn set_stock(&mut self, stock: i64) -> CoreResult<()> {
        validate_stock_amount(stock)?;
        self.stock = stock;
        Ok(())
    }

    #[inline]
    pub fn expires_on(&self) -> Option<NaiveDate> {
        self.expires_on
    }
}

/// Prints the identity, e.g. `"Arla Mellanmjölk"`.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
