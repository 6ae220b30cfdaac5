//! # tally-core: Pure Business Logic for Tally POS
//!
//! Domain types, money arithmetic and request validation for the Tally POS
//! backend. Nothing in here touches the database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React SPA)                         │   │
//! │  │      Transaction list ──► Detail view ──► Checkout form         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-api (axum)                             │   │
//! │  │    /api/cashiers, /api/products, /api/transactions, ...         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │ validation│  │   │
//! │  │   │  Cashier  │  │   Money   │  │   rate    │  │  requests │  │   │
//! │  │   │  Product  │  │  subtotal │  │   (bps)   │  │  → drafts │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │         SQLite pool, migrations, repositories, writer           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain and wire types (Cashier, Product, TransactionDetail, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Request validation producing checked drafts
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//!
//! let unit_price = Money::new(1000);
//! let subtotal = unit_price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(subtotal.amount(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name used for transactions recorded without a customer.
///
/// Read views substitute this when `customer_id` is null.
pub const WALK_IN_CUSTOMER_NAME: &str = "Walk-in Customer";

/// Upper bound for a line discount, in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;
