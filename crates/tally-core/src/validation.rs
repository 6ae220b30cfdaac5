//! # Validation Module
//!
//! Turns raw request bodies into validated drafts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (tally-api)                                   │
//! │  └── JSON syntax and field types                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields present and non-blank                             │
//! │  ├── Cart present, then non-empty                                      │
//! │  └── Line quantities, prices, discounts, subtotal overflow             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE index on customers.phone                                   │
//! │  └── Foreign key constraints (cashier_id, product_id)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs before a database transaction is opened, so a
//! rejected request has no side effects.
//!
//! ## Usage
//! ```rust
//! use tally_core::types::NewCashierRequest;
//! use tally_core::validation::validate_new_cashier;
//!
//! let ok = validate_new_cashier(NewCashierRequest { name: Some("Ana".into()) });
//! assert!(ok.is_ok());
//! assert!(validate_new_cashier(NewCashierRequest::default()).is_err());
//! ```

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::types::{
    CartLineRequest, DiscountRate, LineDraft, NewCashier, NewCashierRequest, NewProduct,
    NewProductRequest, NewTransactionRequest, TransactionDraft,
};
use crate::MAX_DISCOUNT_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length for names, codes and sales numbers.
const MAX_TEXT_LEN: usize = 255;

/// Maximum length for a phone number.
const MAX_PHONE_LEN: usize = 30;

/// Maximum length for free-form notes.
const MAX_NOTES_LEN: usize = 1000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must be present
/// - Must not be blank after trimming
/// - Must be at most `max` characters
///
/// ## Returns
/// The trimmed value.
pub fn validate_required_text(
    value: Option<String>,
    field: &str,
    max: usize,
) -> ValidationResult<String> {
    let value = value.as_deref().map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates an optional text field. Blank values collapse to `None`.
pub fn validate_optional_text(
    value: Option<String>,
    field: &str,
    max: usize,
) -> ValidationResult<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64, field: &str) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, no discount)
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_amount;
///
/// assert!(validate_amount(1000, "unit_price").is_ok());
/// assert!(validate_amount(0, "unit_price").is_ok());
/// assert!(validate_amount(-1, "unit_price").is_err());
/// ```
pub fn validate_amount(amount: i64, field: &str) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount percentage (0–100, at most two decimal places).
pub fn validate_discount_percentage(pct: f64, field: &str) -> ValidationResult<DiscountRate> {
    DiscountRate::try_from_percentage(pct).map_err(|err| match err {
        CoreError::DiscountPrecision { .. } => ValidationError::TooPrecise {
            field: field.to_string(),
            places: 2,
        },
        _ => ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: (MAX_DISCOUNT_BPS / 100) as i64,
        },
    })
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a `POST /api/cashiers` body.
pub fn validate_new_cashier(req: NewCashierRequest) -> ValidationResult<NewCashier> {
    Ok(NewCashier {
        name: validate_required_text(req.name, "name", MAX_TEXT_LEN)?,
    })
}

/// Validates a `POST /api/products` body.
///
/// ## Rules
/// - `name`, `unit_price`, `code` all required
/// - `unit_price >= 0`
pub fn validate_new_product(req: NewProductRequest) -> ValidationResult<NewProduct> {
    let name = validate_required_text(req.name, "name", MAX_TEXT_LEN)?;
    let unit_price = req
        .unit_price
        .ok_or_else(|| ValidationError::required("unit_price"))?;
    let code = validate_required_text(req.code, "code", MAX_TEXT_LEN)?;

    validate_amount(unit_price, "unit_price")?;

    Ok(NewProduct {
        name,
        unit_price: Money::new(unit_price),
        code,
    })
}

// =============================================================================
// Transaction Validator
// =============================================================================

/// Validates a `POST /api/transactions` body into a [`TransactionDraft`].
///
/// ## Check Order
/// ```text
/// sales_number ──► cashier_id ──► customer_name
///      │
///      ▼
/// cart present? ──► cart non-empty? ──► each line
///      │
///      ▼
/// header amounts (defaults derived from lines)
/// ```
///
/// Presence of `cart` is checked before its length, so an omitted cart is
/// reported as `cart is required` rather than failing on a missing value.
///
/// ## Amount Defaults
/// - `subtotal` defaults to the sum of line subtotals
/// - `discount` defaults to 0
/// - `total` defaults to `subtotal - discount`, which must not go negative
pub fn validate_new_transaction(req: NewTransactionRequest) -> ValidationResult<TransactionDraft> {
    let sales_number = validate_required_text(req.sales_number, "sales_number", MAX_TEXT_LEN)?;
    let cashier_id = req
        .cashier_id
        .ok_or_else(|| ValidationError::required("cashier_id"))?;
    let customer_name = validate_required_text(req.customer_name, "customer_name", MAX_TEXT_LEN)?;

    let cart = req.cart.ok_or_else(|| ValidationError::required("cart"))?;
    if cart.is_empty() {
        return Err(ValidationError::Empty {
            field: "cart".to_string(),
        });
    }

    let lines = cart
        .into_iter()
        .enumerate()
        .map(|(idx, line)| validate_cart_line(idx, line))
        .collect::<ValidationResult<Vec<_>>>()?;

    let customer_phone = validate_optional_text(req.customer_phone, "customer_phone", MAX_PHONE_LEN)?;
    let notes = validate_optional_text(req.notes, "notes", MAX_NOTES_LEN)?;
    let printed_by = validate_optional_text(req.printed_by, "printed_by", MAX_TEXT_LEN)?;

    let lines_subtotal = lines
        .iter()
        .try_fold(Money::zero(), |acc, line| acc.checked_add(line.subtotal))
        .map_err(|_| ValidationError::TooLarge {
            field: "cart".to_string(),
        })?;

    let subtotal = match req.subtotal {
        Some(v) => {
            validate_amount(v, "subtotal")?;
            Money::new(v)
        }
        None => lines_subtotal,
    };
    let discount = match req.discount {
        Some(v) => {
            validate_amount(v, "discount")?;
            Money::new(v)
        }
        None => Money::zero(),
    };
    let total = match req.total {
        Some(v) => {
            validate_amount(v, "total")?;
            Money::new(v)
        }
        None => {
            let derived = subtotal - discount;
            validate_amount(derived.amount(), "total")?;
            derived
        }
    };

    Ok(TransactionDraft {
        sales_number,
        cashier_id,
        customer_name,
        customer_phone,
        subtotal,
        discount,
        total,
        notes,
        printed_by,
        lines,
    })
}

/// Validates one cart line and computes its subtotal.
fn validate_cart_line(idx: usize, line: CartLineRequest) -> ValidationResult<LineDraft> {
    let field = |name: &str| format!("cart[{}].{}", idx, name);

    let product_id = line
        .product_id
        .ok_or_else(|| ValidationError::required(field("product_id")))?;
    let quantity = line
        .quantity
        .ok_or_else(|| ValidationError::required(field("quantity")))?;
    let unit_price = line
        .unit_price
        .ok_or_else(|| ValidationError::required(field("unit_price")))?;

    validate_quantity(quantity, &field("quantity"))?;
    validate_amount(unit_price, &field("unit_price"))?;

    let discount = match line.discount_percentage {
        Some(pct) => validate_discount_percentage(pct, &field("discount_percentage"))?,
        None => DiscountRate::zero(),
    };

    let unit_price = Money::new(unit_price);
    let subtotal = unit_price
        .checked_multiply_quantity(quantity)
        .map_err(|_| ValidationError::TooLarge {
            field: field("subtotal"),
        })?;

    Ok(LineDraft {
        product_id,
        quantity,
        unit_price,
        discount,
        subtotal,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: i64, unit_price: i64) -> CartLineRequest {
        CartLineRequest {
            product_id: Some(product_id),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            discount_percentage: None,
        }
    }

    fn valid_request() -> NewTransactionRequest {
        NewTransactionRequest {
            sales_number: Some("S-0001".to_string()),
            cashier_id: Some(1),
            customer_name: Some("Budi".to_string()),
            cart: Some(vec![line(1, 2, 1000)]),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_text() {
        assert_eq!(
            validate_required_text(Some("  Ana ".into()), "name", 10).unwrap(),
            "Ana"
        );
        assert_eq!(
            validate_required_text(None, "name", 10),
            Err(ValidationError::required("name"))
        );
        assert_eq!(
            validate_required_text(Some("   ".into()), "name", 10),
            Err(ValidationError::required("name"))
        );
        assert!(validate_required_text(Some("A".repeat(11)), "name", 10).is_err());
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(validate_optional_text(Some(" ".into()), "notes", 5).unwrap(), None);
        assert_eq!(validate_optional_text(None, "notes", 5).unwrap(), None);
        assert_eq!(
            validate_optional_text(Some("hi".into()), "notes", 5).unwrap(),
            Some("hi".to_string())
        );
    }

    #[test]
    fn test_new_cashier() {
        assert!(validate_new_cashier(NewCashierRequest { name: Some("Ana".into()) }).is_ok());
        assert_eq!(
            validate_new_cashier(NewCashierRequest::default()).unwrap_err().to_string(),
            "name is required"
        );
    }

    #[test]
    fn test_new_product_requires_every_field() {
        let full = NewProductRequest {
            name: Some("Teh Botol".into()),
            unit_price: Some(5000),
            code: Some("TB-01".into()),
        };
        assert_eq!(validate_new_product(full.clone()).unwrap().unit_price.amount(), 5000);

        let no_price = NewProductRequest { unit_price: None, ..full.clone() };
        assert_eq!(
            validate_new_product(no_price).unwrap_err(),
            ValidationError::required("unit_price")
        );

        let no_code = NewProductRequest { code: None, ..full.clone() };
        assert_eq!(validate_new_product(no_code).unwrap_err(), ValidationError::required("code"));

        let negative = NewProductRequest { unit_price: Some(-1), ..full };
        assert!(validate_new_product(negative).is_err());
    }

    #[test]
    fn test_transaction_missing_header_fields() {
        for field in ["sales_number", "cashier_id", "customer_name"] {
            let mut req = valid_request();
            match field {
                "sales_number" => req.sales_number = None,
                "cashier_id" => req.cashier_id = None,
                _ => req.customer_name = None,
            }
            assert_eq!(
                validate_new_transaction(req).unwrap_err(),
                ValidationError::required(field)
            );
        }
    }

    #[test]
    fn test_transaction_missing_cart_is_required_error() {
        let req = NewTransactionRequest { cart: None, ..valid_request() };
        assert_eq!(
            validate_new_transaction(req).unwrap_err().to_string(),
            "cart is required"
        );
    }

    #[test]
    fn test_transaction_empty_cart() {
        let req = NewTransactionRequest { cart: Some(vec![]), ..valid_request() };
        assert_eq!(
            validate_new_transaction(req).unwrap_err().to_string(),
            "cart must contain at least one item"
        );
    }

    #[test]
    fn test_line_subtotal_is_pre_discount() {
        let mut req = valid_request();
        req.cart = Some(vec![CartLineRequest {
            discount_percentage: Some(10.0),
            ..line(1, 2, 1000)
        }]);

        let draft = validate_new_transaction(req).unwrap();
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].subtotal.amount(), 2000);
        assert_eq!(draft.lines[0].discount.bps(), 1000);
    }

    #[test]
    fn test_amount_defaults() {
        let mut req = valid_request();
        req.cart = Some(vec![line(1, 2, 1000), line(2, 1, 500)]);
        req.discount = Some(300);

        let draft = validate_new_transaction(req).unwrap();
        assert_eq!(draft.subtotal.amount(), 2500);
        assert_eq!(draft.discount.amount(), 300);
        assert_eq!(draft.total.amount(), 2200);
    }

    #[test]
    fn test_derived_total_cannot_go_negative() {
        let mut req = valid_request();
        req.discount = Some(5000);

        assert_eq!(
            validate_new_transaction(req).unwrap_err(),
            ValidationError::OutOfRange {
                field: "total".to_string(),
                min: 0,
                max: i64::MAX,
            }
        );

        let mut req = valid_request();
        req.discount = Some(2000);
        assert_eq!(validate_new_transaction(req).unwrap().total, Money::zero());
    }

    #[test]
    fn test_explicit_total_is_kept() {
        let mut req = valid_request();
        req.subtotal = Some(2000);
        req.discount = Some(200);
        req.total = Some(1800);

        let draft = validate_new_transaction(req).unwrap();
        assert_eq!(draft.total.amount(), 1800);
    }

    #[test]
    fn test_line_errors_name_the_line() {
        let mut req = valid_request();
        req.cart = Some(vec![line(1, 1, 100), line(2, 0, 100)]);
        assert_eq!(
            validate_new_transaction(req).unwrap_err().to_string(),
            "cart[1].quantity must be positive"
        );

        let mut req = valid_request();
        req.cart = Some(vec![CartLineRequest { product_id: None, ..line(1, 1, 100) }]);
        assert_eq!(
            validate_new_transaction(req).unwrap_err(),
            ValidationError::required("cart[0].product_id")
        );

        let mut req = valid_request();
        req.cart = Some(vec![CartLineRequest {
            discount_percentage: Some(150.0),
            ..line(1, 1, 100)
        }]);
        assert!(validate_new_transaction(req).is_err());
    }

    #[test]
    fn test_discount_finer_than_a_hundredth_is_rejected() {
        assert_eq!(
            validate_discount_percentage(12.345, "cart[0].discount_percentage").unwrap_err(),
            ValidationError::TooPrecise {
                field: "cart[0].discount_percentage".to_string(),
                places: 2,
            }
        );
        assert_eq!(validate_discount_percentage(12.5, "d").unwrap().bps(), 1250);
        assert_eq!(validate_discount_percentage(12.34, "d").unwrap().bps(), 1234);
        assert_eq!(validate_discount_percentage(10.0, "d").unwrap().bps(), 1000);
        assert!(matches!(
            validate_discount_percentage(101.0, "d"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_line_overflow_rejected() {
        let mut req = valid_request();
        req.cart = Some(vec![line(1, 3, i64::MAX / 2)]);
        assert_eq!(
            validate_new_transaction(req).unwrap_err(),
            ValidationError::TooLarge { field: "cart[0].subtotal".to_string() }
        );
    }

    #[test]
    fn test_blank_phone_means_walk_in() {
        let req = NewTransactionRequest {
            customer_phone: Some("  ".to_string()),
            ..valid_request()
        };
        assert_eq!(validate_new_transaction(req).unwrap().customer_phone, None);
    }
}
