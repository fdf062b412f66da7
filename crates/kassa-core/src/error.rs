//! # Error Types
//!
//! Domain-specific error types for kassa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kassa-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule and state violations              │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  kassa-store errors (separate crate)                                    │
//! │  └── StoreError       - File read/rewrite and parse failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (brand, name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Errors are raised synchronously at the point of violation; nothing is
//!    retried or recovered automatically

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Three families, matching how callers should react:
/// - invalid-argument: out-of-range or malformed inputs
/// - not-found: operations referencing an absent product or membership
/// - illegal-state: operations violating a state invariant (scanning a
///   closed purchase, joining a membership twice, underage membership)
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not present in the inventory.
    #[error("product not found: {brand} {name}")]
    ProductNotFound { brand: String, name: String },

    /// A product with the same identity key already exists.
    #[error("product already present: {brand} {name}")]
    ProductAlreadyPresent { brand: String, name: String },

    /// Scanning a product whose available stock is 0.
    #[error("out of stock: {brand} {name}")]
    OutOfStock { brand: String, name: String },

    /// Removing a product that was never scanned in this purchase.
    #[error("not scanned in this purchase: {brand} {name}")]
    NotScanned { brand: String, name: String },

    /// Stock adjustment would go negative or overflow.
    #[error("invalid stock adjustment for {brand} {name}: {delta:+} from {current}")]
    InvalidStockAdjustment {
        brand: String,
        name: String,
        current: i64,
        delta: i64,
    },

    /// Mutating a purchase after it has been cancelled.
    #[error("purchase is closed, start a new purchase")]
    PurchaseClosed,

    /// A monetary amount was negative where only non-negative is allowed.
    #[error("negative amount: {0}")]
    NegativeAmount(i64),

    /// Monetary arithmetic would underflow or overflow.
    #[error("amount arithmetic out of range")]
    AmountOutOfRange,

    /// The value is not one of the enumerated bill/coin face values.
    #[error("invalid denomination: {0}")]
    InvalidDenomination(i64),

    /// An amount that cannot be broken down into the denomination set.
    ///
    /// ## When This Occurs
    /// The fixed set ends at a 1 öre coin, so every non-negative amount is
    /// representable in practice. The error path exists so the change
    /// calculator stays correct if the set is ever narrowed.
    #[error("amount not representable in available denominations, remainder {remainder}")]
    UnrepresentableAmount { remainder: i64 },

    /// Joining a membership when already a member.
    #[error("already a member")]
    AlreadyMember,

    /// Leaving (or reading) a membership that does not exist.
    #[error("not a member")]
    NotAMember,

    /// Joining a membership below the minimum age.
    #[error("customer is not {min_years} years old")]
    UnderAge { min_years: i32 },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Invalid format (wrong characters, malformed date digits, etc.).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
