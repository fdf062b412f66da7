//! # kassa-core: Pure Business Logic for Kassa
//!
//! This crate is the **heart** of Kassa, a single-till retail point-of-sale
//! library. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kassa Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ★ kassa-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   money   │  │   cash    │  │ purchase  │  │ customer  │   │   │
//! │  │   │   Money   │  │ Denom.    │  │ Purchase  │  │ Customer  │   │   │
//! │  │   │           │  │ change    │  │ Receipt   │  │ Membership│   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK READS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kassa-store (File Layer)                       │   │
//! │  │         register balance file, inventory CSV loader             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with non-negative integer arithmetic (no floats!)
//! - [`cash`] - Physical denominations, wallets, and the change calculator
//! - [`vat`] - VAT categories and their percentages
//! - [`product`] - Products, composite identity keys, price/VAT/discount math
//! - [`inventory`] - The keyed product collection and stock bookkeeping
//! - [`purchase`] - The scan/remove/cancel purchase accumulator
//! - [`receipt`] - Immutable purchase snapshots for printing
//! - [`customer`] - Customers and their optional memberships
//! - [`membership`] - Point-driven membership tiers
//! - [`validation`] - Field-level input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system and network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in öre (i64) to avoid float errors
//! 4. **Explicit Dates**: Rules that depend on "today" take it as a parameter
//! 5. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cash;
pub mod customer;
pub mod error;
pub mod inventory;
pub mod membership;
pub mod money;
pub mod product;
pub mod purchase;
pub mod receipt;
pub mod validation;
pub mod vat;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kassa_core::Money` instead of
// `use kassa_core::money::Money`

pub use cash::{Denomination, Wallet};
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use membership::{Membership, MembershipTier};
pub use money::Money;
pub use product::{Product, ProductConfig, ProductKey};
pub use purchase::Purchase;
pub use receipt::Receipt;
pub use vat::VatRate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency code for every monetary amount in the system.
///
/// ## Why a constant?
/// The till handles a single currency. Amounts are öre (the minor unit of
/// SEK); there is no conversion anywhere in the codebase.
pub const CURRENCY: &str = "SEK";

/// Stock level below which a product counts as "low in stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Products expiring within this many days are reported as "about to expire".
pub const EXPIRY_WARNING_DAYS: i64 = 5;

/// Member points needed for the Silver tier.
///
/// ## Business Reason
/// Member points are öre-correlated: a purchase worth 400kr (40_000 öre)
/// earns 40_000 points. Silver therefore unlocks at 25_000kr of purchases.
pub const SILVER_THRESHOLD: i64 = 2_500_000;

/// Member points needed for the Gold tier (100_000kr of purchases).
pub const GOLD_THRESHOLD: i64 = 10_000_000;

/// Minimum age for joining a membership.
pub const ADULT_AGE_YEARS: i32 = 18;
