//! # Receipt Module
//!
//! An immutable snapshot of a purchase, suitable for printing. The
//! snapshot copies everything it needs, so later scans or a cancel on the
//! purchase never change what the customer took home on paper.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::product::ProductKey;
use crate::purchase::Purchase;

// =============================================================================
// Receipt
// =============================================================================

/// One printed line: which product and how many units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product: ProductKey,
    pub quantity: i64,
}

/// The printable record of a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    total_ex_vat: i64,
    total_vat: i64,
    total_discount: i64,
    total_price: i64,
    date: NaiveDate,
}

impl Receipt {
    /// Snapshots a purchase as of `date`.
    ///
    /// The caller supplies the date; this crate does not read the clock.
    pub fn from_purchase(purchase: &Purchase, date: NaiveDate) -> Self {
        Receipt {
            lines: purchase
                .scanned_lines()
                .map(|(key, line)| ReceiptLine {
                    product: key.clone(),
                    quantity: line.quantity(),
                })
                .collect(),
            total_ex_vat: purchase.total_ex_vat(),
            total_vat: purchase.total_vat(),
            total_discount: purchase.total_discount(),
            total_price: purchase.total_price(),
            date,
        }
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Renders the paper receipt. Amounts print as whole kronor, öre
/// truncated, the way the original till printed them.
impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Items purchased:")?;
        for line in &self.lines {
            writeln!(f, "{}, quantity: {}", line.product, line.quantity)?;
        }
        writeln!(f, "Price ex VAT: {}kr", self.total_ex_vat / 100)?;
        writeln!(f, "VAT: {}kr", self.total_vat / 100)?;
        writeln!(f, "Discount: {}kr", self.total_discount / 100)?;
        writeln!(f, "Total: {}kr", self.total_price / 100)?;
        write!(f, "Date: {}", self.date)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use crate::product::{Product, ProductConfig};
    use crate::vat::VatRate;

    fn setup() -> (Inventory, Purchase) {
        let mut inventory = Inventory::new();
        inventory
            .add(
                Product::new(ProductConfig {
                    brand: "Arla".to_string(),
                    name: "Mellanmjölk".to_string(),
                    price: 2000,
                    vat: VatRate::Food,
                    discount_percent: 10,
                    stock: 10,
                    expires_on: None,
                })
                .unwrap(),
            )
            .unwrap();
        (inventory, Purchase::new())
    }

    #[test]
    fn test_snapshot_copies_lines_and_totals() {
        let (mut inventory, mut purchase) = setup();
        let milk = ProductKey::new("Arla", "Mellanmjölk");
        purchase.scan(&mut inventory, &milk).unwrap();
        purchase.scan(&mut inventory, &milk).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let receipt = Receipt::from_purchase(&purchase, date);

        assert_eq!(receipt.lines().len(), 1);
        assert_eq!(receipt.lines()[0].quantity, 2);
        assert_eq!(receipt.total_price(), purchase.total_price());

        // A later cancel must not change the printed record.
        purchase.cancel(&mut inventory).unwrap();
        assert_eq!(receipt.lines()[0].quantity, 2);
        assert_ne!(receipt.total_price(), 0);
    }

    #[test]
    fn test_serializes_with_stable_field_names() {
        let (mut inventory, mut purchase) = setup();
        let milk = ProductKey::new("Arla", "Mellanmjölk");
        purchase.scan(&mut inventory, &milk).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let receipt = Receipt::from_purchase(&purchase, date);

        let json: serde_json::Value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["total_price"], 2016);
        assert_eq!(json["lines"][0]["quantity"], 1);
        assert_eq!(json["lines"][0]["product"]["brand"], "Arla");
    }

    #[test]
    fn test_display_renders_whole_kronor() {
        let (mut inventory, mut purchase) = setup();
        let milk = ProductKey::new("Arla", "Mellanmjölk");
        purchase.scan(&mut inventory, &milk).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let printed = Receipt::from_purchase(&purchase, date).to_string();

        // 2000 ex VAT, 240 VAT, 224 discount, 2016 total.
        assert!(printed.contains("Arla Mellanmjölk, quantity: 1"));
        assert!(printed.contains("Price ex VAT: 20kr"));
        assert!(printed.contains("VAT: 2kr"));
        assert!(printed.contains("Discount: 2kr"));
        assert!(printed.contains("Total: 20kr"));
        assert!(printed.contains("Date: 2026-08-27"));
    }
}
