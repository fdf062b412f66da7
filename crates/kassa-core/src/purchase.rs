//! # Purchase Module
//!
//! The scan/remove/cancel accumulator at the heart of the till.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Purchase Lifecycle                                 │
//! │                                                                         │
//! │   Purchase::new()                                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌─────────┐   scan / remove_scanned    ┌──────────┐                   │
//! │   │  Open   │ ─────────────────────────► │  Open    │                   │
//! │   │         │ ◄───────────────────────── │          │                   │
//! │   └────┬────┘                            └──────────┘                   │
//! │        │ cancel()                                                       │
//! │        ▼                                                                │
//! │   ┌─────────┐   scan / remove_scanned                                   │
//! │   │ Closed  │ ─────────────────────────► Err(PurchaseClosed)            │
//! │   └─────────┘   (start a new Purchase)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reversibility
//! Each scan freezes the product's unit price, VAT amount, and discount
//! amount into the scanned line. Removing reverses the totals with those
//! frozen values, so scan followed by remove restores every total exactly,
//! even if the product's discount changed in between.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::product::ProductKey;

// =============================================================================
// Scanned Line
// =============================================================================

/// One scanned product with its frozen per-unit price components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedLine {
    quantity: i64,
    /// Per-unit price in öre, without VAT, frozen at first scan.
    unit_price: i64,
    /// Per-unit VAT amount, frozen at first scan.
    unit_vat: i64,
    /// Per-unit discount amount, frozen at first scan. 0 when no discount.
    unit_discount: i64,
}

impl ScannedLine {
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    /// What one unit of this line costs over the counter.
    pub fn unit_total(&self) -> i64 {
        self.unit_price + self.unit_vat - self.unit_discount
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A purchase in progress: scanned quantities plus running totals.
///
/// The purchase never touches product stock directly; every stock change
/// goes through the [`Inventory`] passed into each operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    closed: bool,
    lines: BTreeMap<ProductKey, ScannedLine>,
    total_ex_vat: i64,
    total_vat: i64,
    total_discount: i64,
}

impl Default for Purchase {
    fn default() -> Self {
        Self::new()
    }
}

impl Purchase {
    /// Starts an empty, open purchase.
    pub fn new() -> Self {
        Purchase {
            closed: false,
            lines: BTreeMap::new(),
            total_ex_vat: 0,
            total_vat: 0,
            total_discount: 0,
        }
    }

    fn ensure_open(&self) -> CoreResult<()> {
        if self.closed {
            return Err(CoreError::PurchaseClosed);
        }
        Ok(())
    }

    /// Scans one unit of a product.
    ///
    /// Takes one unit off the shelf and adds the product's price, VAT
    /// amount, and discount amount to the running totals.
    ///
    /// ## Errors
    /// - [`CoreError::PurchaseClosed`] after `cancel`
    /// - [`CoreError::ProductNotFound`] if the key is not stocked
    /// - [`CoreError::OutOfStock`] when available stock is 0
    pub fn scan(&mut self, inventory: &mut Inventory, key: &ProductKey) -> CoreResult<()> {
        self.ensure_open()?;

        let product = inventory.get(key)?;
        if product.stock() == 0 {
            return Err(CoreError::OutOfStock {
                brand: key.brand.clone(),
                name: key.name.clone(),
            });
        }
        let unit_price = product.price();
        let unit_vat = product.vat_amount();
        let unit_discount = product.discount_amount();

        inventory.adjust_stock(key, -1)?;

        let line = self.lines.entry(key.clone()).or_insert(ScannedLine {
            quantity: 0,
            unit_price,
            unit_vat,
            unit_discount,
        });
        line.quantity += 1;

        // Totals always move by the line's frozen components so that
        // remove_scanned can reverse them exactly.
        self.total_ex_vat += line.unit_price;
        self.total_vat += line.unit_vat;
        self.total_discount += line.unit_discount;
        Ok(())
    }

    /// Removes one scanned unit, putting it back on the shelf.
    ///
    /// Reverses the three total increments with the same frozen per-unit
    /// values the scan used. The line disappears when its quantity
    /// reaches zero.
    ///
    /// ## Errors
    /// - [`CoreError::PurchaseClosed`] after `cancel`
    /// - [`CoreError::NotScanned`] if the product is not in this purchase
    pub fn remove_scanned(
        &mut self,
        inventory: &mut Inventory,
        key: &ProductKey,
    ) -> CoreResult<()> {
        self.ensure_open()?;

        if !self.lines.contains_key(key) {
            return Err(CoreError::NotScanned {
                brand: key.brand.clone(),
                name: key.name.clone(),
            });
        }

        inventory.adjust_stock(key, 1)?;

        let line = self.lines.get_mut(key).expect("checked above");
        self.total_ex_vat -= line.unit_price;
        self.total_vat -= line.unit_vat;
        self.total_discount -= line.unit_discount;

        line.quantity -= 1;
        if line.quantity == 0 {
            self.lines.remove(key);
        }
        Ok(())
    }

    /// Cancels the purchase.
    ///
    /// Every scanned quantity goes back on the shelf, the totals are
    /// zeroed, and the purchase closes; a new `Purchase` must be created
    /// for the next customer. Cancelling an already-closed or empty
    /// purchase is a no-op.
    ///
    /// Each line leaves the purchase the moment its stock is restored. If
    /// a restore fails partway (a scanned product was delisted from the
    /// inventory), the failing line and everything after it stay in the
    /// purchase with their totals, and a retried `cancel` picks up where
    /// this one stopped instead of restocking the restored lines again.
    pub fn cancel(&mut self, inventory: &mut Inventory) -> CoreResult<()> {
        if self.closed {
            return Ok(());
        }
        while let Some((key, line)) = self.lines.pop_first() {
            if let Err(err) = inventory.adjust_stock(&key, line.quantity) {
                // Keep the unrestored line so a retry can still return it.
                self.lines.insert(key, line);
                return Err(err);
            }
            self.total_ex_vat -= line.quantity * line.unit_price;
            self.total_vat -= line.quantity * line.unit_vat;
            self.total_discount -= line.quantity * line.unit_discount;
        }
        self.closed = true;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of scanned prices, without VAT, in öre.
    #[inline]
    pub fn total_ex_vat(&self) -> i64 {
        self.total_ex_vat
    }

    /// Sum of scanned VAT amounts, in öre.
    #[inline]
    pub fn total_vat(&self) -> i64 {
        self.total_vat
    }

    /// Sum of scanned discount amounts, in öre.
    #[inline]
    pub fn total_discount(&self) -> i64 {
        self.total_discount
    }

    /// What the customer pays: `(ex VAT + VAT) - discount`.
    pub fn total_price(&self) -> i64 {
        (self.total_ex_vat + self.total_vat) - self.total_discount
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    /// Quantity scanned for a product; 0 if never scanned.
    pub fn scanned_quantity(&self, key: &ProductKey) -> i64 {
        self.lines.get(key).map_or(0, |line| line.quantity)
    }

    /// Iterates over scanned lines in key order.
    pub fn scanned_lines(&self) -> impl Iterator<Item = (&ProductKey, &ScannedLine)> {
        self.lines.iter()
    }

    /// Checks if nothing is scanned.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checks if the purchase still accepts scans.
    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Product, ProductConfig};
    use crate::vat::VatRate;

    // Mirrors the shop shelf the original exercise tested against.
    fn stocked_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        for (brand, name, price, vat, stock, discount) in [
            ("Arla", "Mellanmjölk", 2000, VatRate::Food, 10, 0),
            ("Axa", "Fruktmusli", 3600, VatRate::Food, 10, 0),
            ("Lambi", "8P toalettpapper", 6500, VatRate::Standard, 10, 10),
            ("Sempers", "Barnmat lasagne", 1500, VatRate::Food, 10, 5),
            ("Arla", "Hushållsost", 12600, VatRate::Food, 10, 5),
            ("Zeta", "Buffalomozzarella", 3400, VatRate::Food, 1, 0),
        ] {
            inventory
                .add(
                    Product::new(ProductConfig {
                        brand: brand.to_string(),
                        name: name.to_string(),
                        price,
                        vat,
                        discount_percent: discount,
                        stock,
                        expires_on: None,
                    })
                    .unwrap(),
                )
                .unwrap();
        }
        inventory
    }

    fn key(brand: &str, name: &str) -> ProductKey {
        ProductKey::new(brand, name)
    }

    #[test]
    fn test_scan_and_remove_leave_correct_lines() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();

        purchase.scan(&mut inventory, &key("Axa", "Fruktmusli")).unwrap();
        purchase.scan(&mut inventory, &key("Lambi", "8P toalettpapper")).unwrap();
        purchase
            .remove_scanned(&mut inventory, &key("Lambi", "8P toalettpapper"))
            .unwrap();
        purchase.scan(&mut inventory, &key("Arla", "Hushållsost")).unwrap();

        assert_eq!(purchase.scanned_quantity(&key("Axa", "Fruktmusli")), 1);
        assert_eq!(purchase.scanned_quantity(&key("Arla", "Hushållsost")), 1);
        assert_eq!(
            purchase.scanned_quantity(&key("Lambi", "8P toalettpapper")),
            0
        );
        assert_eq!(purchase.scanned_lines().count(), 2);
    }

    #[test]
    fn test_scan_same_product_twice_accumulates_quantity() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let milk = key("Arla", "Mellanmjölk");

        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.scan(&mut inventory, &milk).unwrap();

        assert_eq!(purchase.scanned_quantity(&milk), 2);
        assert_eq!(inventory.get(&milk).unwrap().stock(), 8);
    }

    #[test]
    fn test_scan_decrements_stock_and_remove_restores_it() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let milk = key("Arla", "Mellanmjölk");

        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.scan(&mut inventory, &key("Axa", "Fruktmusli")).unwrap();
        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.remove_scanned(&mut inventory, &milk).unwrap();

        assert_eq!(inventory.get(&milk).unwrap().stock(), 9);
    }

    #[test]
    fn test_scan_out_of_stock_fails() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let mozzarella = key("Zeta", "Buffalomozzarella");

        purchase.scan(&mut inventory, &mozzarella).unwrap();
        let err = purchase.scan(&mut inventory, &mozzarella).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
    }

    #[test]
    fn test_remove_never_scanned_fails() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        purchase.scan(&mut inventory, &key("Arla", "Mellanmjölk")).unwrap();

        let err = purchase
            .remove_scanned(&mut inventory, &key("Sempers", "Barnmat lasagne"))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotScanned { .. }));
    }

    #[test]
    fn test_totals_accumulate_per_product_components() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();

        let keys = [
            key("Arla", "Mellanmjölk"),
            key("Lambi", "8P toalettpapper"),
            key("Arla", "Hushållsost"),
        ];
        let mut expected_ex_vat = 0;
        let mut expected_vat = 0;
        let mut expected_discount = 0;
        for k in &keys {
            let product = inventory.get(k).unwrap();
            expected_ex_vat += product.price();
            expected_vat += product.vat_amount();
            expected_discount += product.discount_amount();
        }
        for k in &keys {
            purchase.scan(&mut inventory, k).unwrap();
        }

        assert_eq!(purchase.total_ex_vat(), expected_ex_vat);
        assert_eq!(purchase.total_vat(), expected_vat);
        assert_eq!(purchase.total_discount(), expected_discount);
        assert_eq!(
            purchase.total_price(),
            (expected_ex_vat + expected_vat) - expected_discount
        );
    }

    #[test]
    fn test_total_price_matches_per_unit_totals() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();

        let keys = [
            key("Arla", "Mellanmjölk"),
            key("Lambi", "8P toalettpapper"),
            key("Arla", "Hushållsost"),
        ];
        let expected: i64 = keys
            .iter()
            .map(|k| inventory.get(k).unwrap().price_with_vat_and_discount())
            .sum();
        for k in &keys {
            purchase.scan(&mut inventory, k).unwrap();
        }

        assert_eq!(purchase.total_price(), expected);
    }

    #[test]
    fn test_scan_then_remove_restores_all_totals_exactly() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let cheese = key("Arla", "Hushållsost");

        purchase.scan(&mut inventory, &key("Arla", "Mellanmjölk")).unwrap();
        let ex_vat_before = purchase.total_ex_vat();
        let vat_before = purchase.total_vat();
        let discount_before = purchase.total_discount();
        let stock_before = inventory.get(&cheese).unwrap().stock();

        purchase.scan(&mut inventory, &cheese).unwrap();
        purchase.remove_scanned(&mut inventory, &cheese).unwrap();

        assert_eq!(purchase.total_ex_vat(), ex_vat_before);
        assert_eq!(purchase.total_vat(), vat_before);
        assert_eq!(purchase.total_discount(), discount_before);
        assert_eq!(inventory.get(&cheese).unwrap().stock(), stock_before);
    }

    #[test]
    fn test_remove_reverses_with_frozen_values_after_discount_change() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let paper = key("Lambi", "8P toalettpapper");

        purchase.scan(&mut inventory, &paper).unwrap();
        // Discount changes mid-purchase; the scanned line keeps the frozen values.
        inventory.get_mut(&paper).unwrap().set_discount_percent(50).unwrap();
        purchase.remove_scanned(&mut inventory, &paper).unwrap();

        assert_eq!(purchase.total_ex_vat(), 0);
        assert_eq!(purchase.total_vat(), 0);
        assert_eq!(purchase.total_discount(), 0);
    }

    #[test]
    fn test_cancel_zeroes_totals_and_restores_stock() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let milk = key("Arla", "Mellanmjölk");
        let cheese = key("Arla", "Hushållsost");

        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.scan(&mut inventory, &cheese).unwrap();
        purchase.remove_scanned(&mut inventory, &milk).unwrap();
        purchase.cancel(&mut inventory).unwrap();

        assert!(purchase.is_empty());
        assert_eq!(purchase.total_ex_vat(), 0);
        assert_eq!(purchase.total_vat(), 0);
        assert_eq!(purchase.total_discount(), 0);
        assert_eq!(purchase.total_price(), 0);
        assert_eq!(inventory.get(&milk).unwrap().stock(), 10);
        assert_eq!(inventory.get(&cheese).unwrap().stock(), 10);
    }

    #[test]
    fn test_failed_cancel_can_be_retried_without_double_restock() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let milk = key("Arla", "Mellanmjölk");
        let mozzarella = key("Zeta", "Buffalomozzarella");

        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.scan(&mut inventory, &mozzarella).unwrap();
        // Delist the mozzarella while the purchase is still open.
        inventory.remove(&mozzarella).unwrap();

        // Milk restores (it sorts first), then the delisted line fails.
        let err = purchase.cancel(&mut inventory).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound { .. }));
        assert_eq!(inventory.get(&milk).unwrap().stock(), 10);
        assert!(purchase.is_open());

        // Retrying must not restock the milk a second time.
        let err = purchase.cancel(&mut inventory).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound { .. }));
        assert_eq!(inventory.get(&milk).unwrap().stock(), 10);

        // Only the unrestored line is left in the totals.
        assert_eq!(purchase.scanned_quantity(&milk), 0);
        assert_eq!(purchase.scanned_quantity(&mozzarella), 1);
        assert_eq!(purchase.total_ex_vat(), 3400);
    }

    #[test]
    fn test_cancel_empty_purchase_is_a_no_op() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();

        purchase.cancel(&mut inventory).unwrap();
        purchase.cancel(&mut inventory).unwrap();
        assert!(purchase.is_empty());
        assert!(!purchase.is_open());
    }

    #[test]
    fn test_closed_purchase_rejects_mutation() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();
        let milk = key("Arla", "Mellanmjölk");

        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.cancel(&mut inventory).unwrap();

        assert!(matches!(
            purchase.scan(&mut inventory, &milk),
            Err(CoreError::PurchaseClosed)
        ));
        assert!(matches!(
            purchase.remove_scanned(&mut inventory, &milk),
            Err(CoreError::PurchaseClosed)
        ));
    }

    #[test]
    fn test_scan_unknown_product_fails() {
        let mut inventory = stocked_inventory();
        let mut purchase = Purchase::new();

        let err = purchase
            .scan(&mut inventory, &key("Oatly", "Havredryck"))
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound { .. }));
    }
}
