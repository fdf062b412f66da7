//! # Store Error Types
//!
//! Errors raised by the file layer. Core errors pass through unchanged;
//! file and parse problems get their own variants with enough context to
//! point at the offending file or line.

use kassa_core::CoreError;
use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Errors from the balance file and the inventory loader.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying file operation failed (missing file, permissions).
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// The balance file content is not a base-10 integer.
    #[error("balance file is not a number: {content:?}")]
    MalformedBalance { content: String },

    /// The balance file holds a negative number.
    #[error("balance file holds a negative balance: {balance}")]
    NegativeBalance { balance: i64 },

    /// An inventory CSV row cannot be parsed.
    ///
    /// `line` is 1-based and counts the header, matching what an editor
    /// shows for the file.
    #[error("malformed inventory row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Cash offered does not cover the cost.
    #[error("insufficient cash: offered {offered} öre against cost {cost} öre")]
    InsufficientCash { offered: i64, cost: i64 },

    /// A business rule violation from kassa-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
