//! # Validation Module
//!
//! Field-level input validation, used by the validated constructors for
//! [`Product`](crate::Product) and [`Customer`](crate::Customer).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE - field checks                                    │
//! │  ├── character classes, lengths, numeric ranges                         │
//! │  └── one function per field, composable                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Constructors (Product::new, Customer::new)                    │
//! │  └── run every field check before any value is built                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Business rules (membership age, stock invariants)             │
//! │  └── illegal-state errors at the point of violation                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// Punctuation that is never allowed in free-text fields. The dash is
// handled separately: names may contain it, identity numbers may not.
const SPECIAL_CHARACTERS: &str = "$&+,:;=\\?@#|/'<>.^*()%!";

fn has_special_character(value: &str, allow_dash: bool) -> bool {
    value
        .chars()
        .any(|c| SPECIAL_CHARACTERS.contains(c) || (!allow_dash && c == '-'))
}

// =============================================================================
// Customer Field Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - 3 to 150 characters
/// - No digits
/// - No special characters (dashes allowed for double names)
///
/// ## Example
/// ```rust
/// use kassa_core::validation::validate_customer_name;
///
/// assert!(validate_customer_name("Anna-Lena Svensson").is_ok());
/// assert!(validate_customer_name("R2D2").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.chars().count() < 3 {
        return Err(ValidationError::TooShort {
            field: "name",
            min: 3,
        });
    }
    if name.chars().count() > 150 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 150,
        });
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "name",
            reason: "cannot contain digits",
        });
    }
    if has_special_character(name, true) {
        return Err(ValidationError::InvalidFormat {
            field: "name",
            reason: "cannot contain special characters",
        });
    }
    Ok(())
}

/// Validates a personal identity number.
///
/// ## Rules
/// - Exactly 10 characters
/// - Digits only (no dash, no letters)
///
/// The first six digits must read as a YYMMDD birth date, but that is
/// checked where the date is actually needed (membership age derivation).
pub fn validate_personal_number(personal_number: &str) -> ValidationResult<()> {
    if personal_number.len() != 10 {
        return Err(ValidationError::InvalidFormat {
            field: "personal number",
            reason: "must be exactly 10 digits",
        });
    }
    if !personal_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "personal number",
            reason: "must contain digits only",
        });
    }
    Ok(())
}

/// Validates an optional phone number.
///
/// ## Rules
/// - 8 to 10 characters
/// - Digits only
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    if phone.len() < 8 {
        return Err(ValidationError::TooShort {
            field: "phone number",
            min: 8,
        });
    }
    if phone.len() > 10 {
        return Err(ValidationError::TooLong {
            field: "phone number",
            max: 10,
        });
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone number",
            reason: "must contain digits only",
        });
    }
    Ok(())
}

/// Validates an optional email address.
///
/// Structural check only: one `@`, a non-empty local part of sane
/// characters, and domain labels that start with a letter. Deliverability
/// is not our problem.
pub fn validate_email_address(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email address",
        reason: "is not correctly formatted",
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+_.-".contains(c))
    {
        return Err(invalid());
    }

    if domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    for label in domain.split('.') {
        let mut chars = label.chars();
        let first_is_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !first_is_letter || !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid());
        }
    }
    Ok(())
}

/// Validates an optional street address.
///
/// ## Rules
/// - No special characters
/// - Must contain a street name (letters) and a street number (digits)
/// - Must start with the street name or end with the street number
pub fn validate_address(address: &str) -> ValidationResult<()> {
    if has_special_character(address, false) {
        return Err(ValidationError::InvalidFormat {
            field: "address",
            reason: "cannot contain special characters",
        });
    }
    if !address.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "address",
            reason: "must contain a street number",
        });
    }
    if !address.chars().any(|c| c.is_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "address",
            reason: "must contain a street name",
        });
    }

    let starts_with_letter = address.chars().next().is_some_and(|c| c.is_alphabetic());
    let ends_with_digit = address.chars().last().is_some_and(|c| c.is_ascii_digit());
    if !(starts_with_letter || ends_with_digit) {
        return Err(ValidationError::InvalidFormat {
            field: "address",
            reason: "must start with a street name and end with a street number",
        });
    }
    Ok(())
}

// =============================================================================
// Product Field Validators
// =============================================================================

/// Validates a product price in öre.
///
/// ## Rules
/// - Must be positive (> 0); nothing on the shelf is free
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::MustBePositive { field: "price" });
    }
    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100; 0 means no discount
pub fn validate_discount_percent(discount: i64) -> ValidationResult<()> {
    if !(0..=100).contains(&discount) {
        return Err(ValidationError::OutOfRange {
            field: "discount",
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates a stock amount.
///
/// ## Rules
/// - Must be non-negative; an empty shelf is a valid shelf
pub fn validate_stock_amount(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock",
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
