//! # Inventory Loader
//!
//! Reads a whole inventory from a comma-separated text file.
//!
//! ## File Format
//! ```text
//! brand,productName,priceInMinorUnits,vatRateName,amount,discount
//! Arla,Mellanmjölk,2000,VAT.FOOD,10,0
//! Lambi,8P toalettpapper,6500,VAT.STANDARD,10,10
//! ```
//! The first line is a header and is always skipped. Every product row
//! goes through [`Product::new`], so a row that parses but violates a
//! business rule (zero price, oversized discount) is rejected with the
//! line number attached.

use std::fs;
use std::path::Path;

use kassa_core::{Inventory, Product, ProductConfig, VatRate};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Inventory Loading
// =============================================================================

/// Loads an inventory from a CSV file.
///
/// ## Errors
/// - [`StoreError::Io`] if the file cannot be read
/// - [`StoreError::MalformedRow`] for a row with the wrong field count,
///   unparsable numbers, or field values that fail product validation
/// - [`StoreError::Core`] if two rows share the same brand and name
pub fn load_inventory(path: impl AsRef<Path>) -> StoreResult<Inventory> {
    let content = fs::read_to_string(path.as_ref())?;
    let mut inventory = Inventory::new();

    // Line numbers are 1-based and count the header, like an editor does.
    for (line, row) in content.lines().enumerate().skip(1) {
        if row.trim().is_empty() {
            continue;
        }
        let product = parse_row(row).map_err(|reason| {
            warn!(line = line + 1, %reason, "malformed inventory row");
            StoreError::MalformedRow {
                line: line + 1,
                reason,
            }
        })?;
        inventory.add(product)?;
    }

    debug!(
        path = %path.as_ref().display(),
        products = inventory.len(),
        "inventory loaded"
    );
    Ok(inventory)
}

fn parse_row(row: &str) -> Result<Product, String> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    }

    let price: i64 = fields[2]
        .parse()
        .map_err(|_| format!("price is not a number: {:?}", fields[2]))?;
    let stock: i64 = fields[4]
        .parse()
        .map_err(|_| format!("amount is not a number: {:?}", fields[4]))?;
    let discount_percent: i64 = fields[5]
        .parse()
        .map_err(|_| format!("discount is not a number: {:?}", fields[5]))?;

    Product::new(ProductConfig {
        brand: fields[0].to_string(),
        name: fields[1].to_string(),
        price,
        vat: VatRate::from_csv_token(fields[3]),
        discount_percent,
        stock,
        expires_on: None,
    })
    .map_err(|err| err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kassa_core::ProductKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "brand,productName,priceInMinorUnits,vatRateName,amount,discount";

    fn csv_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_loads_products_with_all_fields() {
        let file = csv_file(&[
            "Arla,Mellanmjölk,2000,VAT.FOOD,10,0",
            "Lambi,8P toalettpapper,6500,VAT.STANDARD,10,10",
        ]);

        let inventory = load_inventory(file.path()).unwrap();
        assert_eq!(inventory.len(), 2);

        let paper = inventory
            .get(&ProductKey::new("Lambi", "8P toalettpapper"))
            .unwrap();
        assert_eq!(paper.price(), 6500);
        assert_eq!(paper.vat(), VatRate::Standard);
        assert_eq!(paper.stock(), 10);
        assert_eq!(paper.discount_percent(), 10);
    }

    #[test]
    fn test_header_is_skipped_not_parsed() {
        let file = csv_file(&[]);
        let inventory = load_inventory(file.path()).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let file = csv_file(&["Arla,Mellanmjölk,2000,VAT.FOOD,10,0", "", "   "]);
        let inventory = load_inventory(file.path()).unwrap();
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_unknown_vat_token_falls_back_to_no_tax() {
        let file = csv_file(&["Pressbyrån,Dagstidning,2500,VAT.MYSTERY,5,0"]);
        let inventory = load_inventory(file.path()).unwrap();
        let paper = inventory
            .get(&ProductKey::new("Pressbyrån", "Dagstidning"))
            .unwrap();
        assert_eq!(paper.vat(), VatRate::NoTax);
    }

    #[test]
    fn test_wrong_field_count_reports_line_number() {
        let file = csv_file(&[
            "Arla,Mellanmjölk,2000,VAT.FOOD,10,0",
            "Axa,Fruktmusli,3600,VAT.FOOD",
        ]);

        let err = load_inventory(file.path()).unwrap_err();
        match err {
            StoreError::MalformedRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 6 fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let file = csv_file(&["Arla,Mellanmjölk,tjugo,VAT.FOOD,10,0"]);
        let err = load_inventory(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_rule_violations_carry_line_context() {
        // Price 0 parses fine but fails product validation.
        let file = csv_file(&["Arla,Mellanmjölk,0,VAT.FOOD,10,0"]);
        let err = load_inventory(file.path()).unwrap_err();
        match err {
            StoreError::MalformedRow { line: 2, reason } => {
                assert!(reason.contains("price"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_rows_are_rejected() {
        let file = csv_file(&[
            "Arla,Mellanmjölk,2000,VAT.FOOD,10,0",
            "Arla,Mellanmjölk,2100,VAT.FOOD,3,0",
        ]);
        let err = load_inventory(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
    }

    #[test]
    fn test_missing_file_fails() {
        let err = load_inventory("/nonexistent/inventory.csv").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
