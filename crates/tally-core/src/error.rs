//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Arithmetic / domain rule failures              │
//! │  └── ValidationError  - Request validation failures (HTTP 400)         │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Constraint, transient and not-found failures   │
//! │                                                                         │
//! │  tally-api errors (in app)                                             │
//! │  └── ApiError         - What the frontend sees: {"error": "..."}       │
//! │                                                                         │
//! │  Flow: ValidationError ──────────────────────► ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, cart line)
//! 3. Errors are enum variants, never String
//! 4. The `Display` text is the message the API returns

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A money computation left the `i64` range.
    ///
    /// ## When This Occurs
    /// - `quantity * unit_price` on absurd inputs
    /// - Summing many huge line subtotals
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// A discount percentage outside 0–100 or not a finite number.
    #[error("Invalid discount percentage: {percentage}")]
    InvalidDiscount { percentage: f64 },

    /// A discount percentage with more precision than one basis point.
    #[error("Discount percentage {percentage} has more than two decimal places")]
    DiscountPrecision { percentage: f64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any database work, so a validation failure never has side
/// effects.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection that must have members is empty.
    #[error("{field} must contain at least one item")]
    Empty { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is too large to compute with.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Fractional value carries more decimal places than can be stored.
    #[error("{field} must have at most {places} decimal places")]
    TooPrecise { field: String, places: u32 },
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
