//! # kassa-store: File Persistence for Kassa
//!
//! This crate provides the file-backed state for the till: the register
//! balance file and the inventory CSV loader. Everything is blocking,
//! synchronous I/O; the system is a single process driving a single till.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kassa Data Flow                                 │
//! │                                                                         │
//! │  kassa-core (pure logic: prices, change, purchases)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   kassa-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐        ┌────────────────────┐         │   │
//! │  │   │    CashRegister    │        │  load_inventory    │         │   │
//! │  │   │   (register.rs)    │        │    (loader.rs)     │         │   │
//! │  │   │                    │        │                    │         │   │
//! │  │   │ balance file read  │        │ CSV rows → Product │         │   │
//! │  │   │ rewrite on payment │        │ header skipped     │         │   │
//! │  │   └─────────┬──────────┘        └─────────┬──────────┘         │   │
//! │  └─────────────┼─────────────────────────────┼────────────────────┘   │
//! │                ▼                             ▼                         │
//! │        balance.txt                     inventory.csv                   │
//! │   (single integer, öre)      (brand,name,price,vat,amount,discount)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`register`] - The balance file store and card/cash payment
//! - [`loader`] - Inventory CSV parsing
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod register;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use loader::load_inventory;
pub use register::CashRegister;
