//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Persisted views (responses)          Requests (optional fields)        │
//! │  ───────────────────────────          ───────────────────────────       │
//! │  Cashier   {id, name}                 NewCashierRequest                 │
//! │  Product   {id, name, price, code}    NewProductRequest                 │
//! │  Customer  {id, name, phone}          NewTransactionRequest             │
//! │  TransactionRecord  (header + names)    └── CartLineRequest × N         │
//! │  TransactionLine    (item + product)                                    │
//! │  TransactionDetail  {transaction, items}                                │
//! │                                                                         │
//! │  Drafts (validated, all fields present)                                 │
//! │  ──────────────────────────────────────                                 │
//! │  NewCashier, NewProduct, TransactionDraft └── LineDraft × N             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request types keep every field optional so that a missing field becomes
//! a [`ValidationError`](crate::ValidationError) with the field's name
//! instead of a deserializer rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::MAX_DISCOUNT_BPS;

// =============================================================================
// Discount Rate
// =============================================================================

/// Line discount represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%. The API speaks percentages;
/// storage uses bps so the database never holds a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscountRate(u32);

const BPS_TOLERANCE: f64 = 1e-6;

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage, rejecting values outside
    /// 0–100, non-finite numbers, and anything finer than one basis point.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::try_from_percentage(12.5).unwrap().bps(), 1250);
    /// assert!(DiscountRate::try_from_percentage(101.0).is_err());
    /// assert!(DiscountRate::try_from_percentage(12.345).is_err());
    /// ```
    pub fn try_from_percentage(pct: f64) -> CoreResult<Self> {
        if !pct.is_finite() || pct < 0.0 {
            return Err(CoreError::InvalidDiscount { percentage: pct });
        }
        let scaled = pct * 100.0;
        let bps = scaled.round();
        if bps > MAX_DISCOUNT_BPS as f64 {
            return Err(CoreError::InvalidDiscount { percentage: pct });
        }
        // Tolerance absorbs binary representation error (12.34 * 100 is not exact).
        if (scaled - bps).abs() > BPS_TOLERANCE {
            return Err(CoreError::DiscountPrecision { percentage: pct });
        }
        Ok(DiscountRate(bps as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

// =============================================================================
// Cashier / Product / Customer
// =============================================================================

/// A cashier who rings up transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cashier {
    pub id: i64,
    pub name: String,
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in whole currency units.
    pub unit_price: i64,
    /// Shelf/barcode code. Intended unique, not enforced.
    pub code: String,
}

/// A customer, keyed in practice by phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
}

// =============================================================================
// Transactions (read side)
// =============================================================================

/// A transaction header joined with cashier and customer names.
///
/// Used for both the list view and the detail view. `customer_name` is
/// already resolved to [`WALK_IN_CUSTOMER_NAME`](crate::WALK_IN_CUSTOMER_NAME)
/// when the transaction has no customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionRecord {
    pub id: i64,
    pub sales_number: String,
    pub cashier_id: i64,
    pub cashier_name: String,
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub subtotal_amount: i64,
    pub discount_amount: i64,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub printed_by: Option<String>,
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
}

/// A line item joined with its product's name and code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionLine {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_code: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub discount_percentage: f64,
    /// `quantity * unit_price`, before discount.
    pub subtotal: i64,
}

/// A transaction with all of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionDetail {
    pub transaction: TransactionRecord,
    pub items: Vec<TransactionLine>,
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/cashiers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCashierRequest {
    pub name: Option<String>,
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProductRequest {
    pub name: Option<String>,
    pub unit_price: Option<i64>,
    pub code: Option<String>,
}

/// One cart entry in a `POST /api/transactions` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineRequest {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub unit_price: Option<i64>,
    /// 0–100 with at most two decimal places (stored as basis points).
    pub discount_percentage: Option<f64>,
}

/// Body of `POST /api/transactions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTransactionRequest {
    pub sales_number: Option<String>,
    pub cashier_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub subtotal: Option<i64>,
    pub discount: Option<i64>,
    pub total: Option<i64>,
    pub notes: Option<String>,
    pub printed_by: Option<String>,
    pub cart: Option<Vec<CartLineRequest>>,
}

// =============================================================================
// Drafts (validated)
// =============================================================================

/// A validated cashier ready for insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCashier {
    pub name: String,
}

/// A validated product ready for insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: Money,
    pub code: String,
}

/// A validated cart line with its subtotal already computed.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDraft {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub discount: DiscountRate,
    /// `quantity * unit_price`.
    pub subtotal: Money,
}

/// A validated transaction ready for the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub sales_number: String,
    pub cashier_id: i64,
    pub customer_name: String,
    /// `None` means a walk-in sale.
    pub customer_phone: Option<String>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub notes: Option<String>,
    pub printed_by: Option<String>,
    /// Never empty.
    pub lines: Vec<LineDraft>,
}

// =============================================================================
// Unit Tests
// =============================================================================
