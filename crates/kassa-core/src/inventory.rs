//! # Inventory Module
//!
//! The keyed collection of sellable products.
//!
//! ## Ownership
//! The inventory owns the canonical stock count for every product. A
//! [`Purchase`](crate::Purchase) never mutates stock directly; it goes
//! through [`Inventory::adjust_stock`], so there is exactly one place
//! where a shelf count can change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::product::{Product, ProductKey};
use crate::{EXPIRY_WARNING_DAYS, LOW_STOCK_THRESHOLD};

// =============================================================================
// Inventory
// =============================================================================

/// Mapping from product identity to product.
///
/// A `BTreeMap` keeps iteration order stable (brand, then name), which in
/// turn keeps report output and receipts deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    products: BTreeMap<ProductKey, Product>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory {
            products: BTreeMap::new(),
        }
    }

    /// Adds a product.
    ///
    /// ## Errors
    /// [`CoreError::ProductAlreadyPresent`] if a product with the same
    /// identity key is already stocked. Restocking goes through
    /// [`Inventory::adjust_stock`], not through a second `add`.
    pub fn add(&mut self, product: Product) -> CoreResult<()> {
        let key = product.key().clone();
        if self.products.contains_key(&key) {
            return Err(CoreError::ProductAlreadyPresent {
                brand: key.brand,
                name: key.name,
            });
        }
        self.products.insert(key, product);
        Ok(())
    }

    /// Removes a product and returns it.
    ///
    /// ## Errors
    /// [`CoreError::ProductNotFound`] if absent.
    pub fn remove(&mut self, key: &ProductKey) -> CoreResult<Product> {
        self.products
            .remove(key)
            .ok_or_else(|| not_found(key))
    }

    /// Looks up a product by key.
    pub fn get(&self, key: &ProductKey) -> CoreResult<&Product> {
        self.products.get(key).ok_or_else(|| not_found(key))
    }

    /// Looks up a product by brand and name.
    pub fn get_by(&self, brand: &str, name: &str) -> CoreResult<&Product> {
        self.get(&ProductKey::new(brand, name))
    }

    /// Mutable lookup, used by discount updates and the purchase flow.
    pub fn get_mut(&mut self, key: &ProductKey) -> CoreResult<&mut Product> {
        self.products.get_mut(key).ok_or_else(|| not_found(key))
    }

    /// Adds `delta` (possibly negative) to a product's stock.
    ///
    /// ## Errors
    /// - [`CoreError::ProductNotFound`] if the key is absent
    /// - [`CoreError::InvalidStockAdjustment`] if the resulting stock
    ///   would be negative or overflow i64
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::{Inventory, Product, ProductConfig, ProductKey, VatRate};
    ///
    /// let mut inventory = Inventory::new();
    /// inventory
    ///     .add(Product::new(ProductConfig {
    ///         brand: "Arla".to_string(),
    ///         name: "Mellanmjölk".to_string(),
    ///         price: 2000,
    ///         vat: VatRate::Food,
    ///         discount_percent: 0,
    ///         stock: 10,
    ///         expires_on: None,
    ///     })
    ///     .unwrap())
    ///     .unwrap();
    ///
    /// let key = ProductKey::new("Arla", "Mellanmjölk");
    /// inventory.adjust_stock(&key, -4).unwrap();
    /// assert_eq!(inventory.get(&key).unwrap().stock(), 6);
    /// assert!(inventory.adjust_stock(&key, -7).is_err());
    /// ```
    pub fn adjust_stock(&mut self, key: &ProductKey, delta: i64) -> CoreResult<()> {
        let product = self.get_mut(key)?;
        let current = product.stock();
        let adjusted = current.checked_add(delta).filter(|next| *next >= 0).ok_or(
            CoreError::InvalidStockAdjustment {
                brand: key.brand.clone(),
                name: key.name.clone(),
                current,
                delta,
            },
        )?;
        product.set_stock(adjusted)?;
        Ok(())
    }

    /// Products whose stock is below [`LOW_STOCK_THRESHOLD`].
    pub fn products_low_in_stock(&self) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.stock() < LOW_STOCK_THRESHOLD)
            .collect()
    }

    /// Products whose expiration date falls within
    /// [`EXPIRY_WARNING_DAYS`] of `today`.
    ///
    /// Uses signed calendar-day differences, so a product expiring on
    /// January 2nd shows up when `today` is December 28th. Products that
    /// have already expired are not "about to" expire and are excluded.
    pub fn products_about_to_expire(&self, today: NaiveDate) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| {
                p.expires_on().is_some_and(|date| {
                    let days_left = (date - today).num_days();
                    (0..=EXPIRY_WARNING_DAYS).contains(&days_left)
                })
            })
            .collect()
    }

    /// Number of distinct products stocked.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the inventory holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates over every product in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

fn not_found(key: &ProductKey) -> CoreError {
    CoreError::ProductNotFound {
        brand: key.brand.clone(),
        name: key.name.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
