//! # Transaction Repository
//!
//! Records sales transactions and reads them back joined with cashier,
//! customer and product names.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     TransactionRepository::create                       │
//! │                                                                         │
//! │  BEGIN IMMEDIATE  (write lock held for the whole unit)                  │
//! │    │                                                                    │
//! │    ├── 1. customer: phone? ──► resolve_by_phone : NULL (walk-in)       │
//! │    ├── 2. INSERT transactions ... RETURNING id                         │
//! │    ├── 3. INSERT transaction_items × len(lines)                        │
//! │    │                                                                    │
//! │    ├── any step fails ──► ROLLBACK ──► Err (no header, no items)       │
//! │    ▼                                                                    │
//! │  COMMIT                                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  get_detail(id)  (joined read of what was just committed)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scoped `sqlx::Transaction` also rolls back on drop, so an early
//! return or a cancelled request never leaves a partial sale behind.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::customer;
use tally_core::types::DiscountRate;
use tally_core::{
    TransactionDetail, TransactionDraft, TransactionLine, TransactionRecord, MAX_DISCOUNT_BPS,
    WALK_IN_CUSTOMER_NAME,
};

// =============================================================================
// Row Types
// =============================================================================

const SELECT_TRANSACTION: &str = r#"
    SELECT
        t.id,
        t.sales_number,
        t.cashier_id,
        c.name AS cashier_name,
        t.customer_id,
        cu.name AS customer_name,
        cu.phone AS customer_phone,
        t.subtotal_amount,
        t.discount_amount,
        t.total_amount,
        t.notes,
        t.printed_by,
        t.transaction_date
    FROM transactions t
    JOIN cashiers c ON c.id = t.cashier_id
    LEFT JOIN customers cu ON cu.id = t.customer_id
"#;

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    sales_number: String,
    cashier_id: i64,
    cashier_name: String,
    customer_id: Option<i64>,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    subtotal_amount: i64,
    discount_amount: i64,
    total_amount: i64,
    notes: Option<String>,
    printed_by: Option<String>,
    transaction_date: String,
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = DbError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let transaction_date = DateTime::parse_from_rfc3339(&row.transaction_date)
            .map_err(|e| {
                DbError::Internal(format!(
                    "bad transaction_date {:?} on transaction {}: {}",
                    row.transaction_date, row.id, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(TransactionRecord {
            id: row.id,
            sales_number: row.sales_number,
            cashier_id: row.cashier_id,
            cashier_name: row.cashier_name,
            customer_id: row.customer_id,
            customer_name: row
                .customer_name
                .unwrap_or_else(|| WALK_IN_CUSTOMER_NAME.to_string()),
            customer_phone: row.customer_phone,
            subtotal_amount: row.subtotal_amount,
            discount_amount: row.discount_amount,
            total_amount: row.total_amount,
            notes: row.notes,
            printed_by: row.printed_by,
            transaction_date,
        })
    }
}

#[derive(Debug, FromRow)]
struct LineRow {
    id: i64,
    transaction_id: i64,
    product_id: i64,
    product_name: String,
    product_code: String,
    quantity: i64,
    unit_price: i64,
    discount_bps: i64,
    subtotal: i64,
}

impl From<LineRow> for TransactionLine {
    fn from(row: LineRow) -> Self {
        // CHECK constraint keeps discount_bps within 0..=10000
        let bps = row.discount_bps.clamp(0, MAX_DISCOUNT_BPS as i64) as u32;

        TransactionLine {
            id: row.id,
            transaction_id: row.transaction_id,
            product_id: row.product_id,
            product_name: row.product_name,
            product_code: row.product_code,
            quantity: row.quantity,
            unit_price: row.unit_price,
            discount_percentage: DiscountRate::from_bps(bps).percentage(),
            subtotal: row.subtotal,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sales transactions and their items.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Atomically records a transaction: customer resolution, header and
    /// every item, or none of them.
    ///
    /// ## Arguments
    /// * `draft` - A validated transaction (see `tally_core::validation`)
    ///
    /// ## Returns
    /// The committed transaction re-read with joined names.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - unknown `cashier_id` or `product_id`
    /// * `DbError::Busy` - another writer held the lock past the busy timeout
    /// * `DbError::ConnectionFailed` / `PoolExhausted` / `TransactionFailed`
    ///
    /// In every error case nothing is persisted.
    pub async fn create(&self, draft: &TransactionDraft) -> DbResult<TransactionDetail> {
        debug!(
            sales_number = %draft.sales_number,
            lines = draft.lines.len(),
            "Recording transaction"
        );

        // Take the write lock up front. A deferred transaction would start as a
        // reader at the phone lookup and could not upgrade once another
        // writer had committed.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let id = match write_transaction(&mut *tx, draft).await {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    sales_number = %draft.sales_number,
                    error = %err,
                    "Transaction write failed, rolling back"
                );
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                return Err(err);
            }
        };

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            transaction_id = id,
            sales_number = %draft.sales_number,
            total = %draft.total,
            items = draft.lines.len(),
            "Transaction recorded"
        );

        self.get_detail(id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))
    }

    /// Lists all transactions, newest first.
    ///
    /// Ties on `transaction_date` are broken by id, highest first.
    pub async fn list(&self) -> DbResult<Vec<TransactionRecord>> {
        let sql = format!("{SELECT_TRANSACTION} ORDER BY t.transaction_date DESC, t.id DESC");

        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    /// Gets one transaction with its items ordered by item id.
    ///
    /// ## Returns
    /// * `Ok(Some(detail))` - Transaction found
    /// * `Ok(None)` - No transaction with that id
    pub async fn get_detail(&self, id: i64) -> DbResult<Option<TransactionDetail>> {
        let sql = format!("{SELECT_TRANSACTION} WHERE t.id = ?1");

        let Some(row) = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT
                i.id,
                i.transaction_id,
                i.product_id,
                p.name AS product_name,
                p.code AS product_code,
                i.quantity,
                i.unit_price,
                i.discount_bps,
                i.subtotal
            FROM transaction_items i
            JOIN products p ON p.id = i.product_id
            WHERE i.transaction_id = ?1
            ORDER BY i.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(TransactionDetail {
            transaction: row.try_into()?,
            items: items.into_iter().map(TransactionLine::from).collect(),
        }))
    }
}

/// Writes the customer, header and items on one connection. Returns the new
/// transaction id.
async fn write_transaction(conn: &mut SqliteConnection, draft: &TransactionDraft) -> DbResult<i64> {
    let customer_id = match draft.customer_phone.as_deref() {
        Some(phone) => Some(customer::resolve_by_phone(conn, &draft.customer_name, phone).await?),
        None => None,
    };

    // Fixed-width timestamp so text ordering matches time ordering.
    let transaction_date = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let transaction_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO transactions (
            sales_number, cashier_id, customer_id,
            subtotal_amount, discount_amount, total_amount,
            notes, printed_by, transaction_date
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        RETURNING id
        "#,
    )
    .bind(&draft.sales_number)
    .bind(draft.cashier_id)
    .bind(customer_id)
    .bind(draft.subtotal.amount())
    .bind(draft.discount.amount())
    .bind(draft.total.amount())
    .bind(&draft.notes)
    .bind(&draft.printed_by)
    .bind(&transaction_date)
    .fetch_one(&mut *conn)
    .await?;

    for (index, line) in draft.lines.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO transaction_items (
                transaction_id, product_id, quantity, unit_price, discount_bps, subtotal
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(transaction_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price.amount())
        .bind(line.discount.bps() as i64)
        .bind(line.subtotal.amount())
        .execute(&mut *conn)
        .await
        .inspect_err(|e| debug!(line = index, error = %e, "Item insert failed"))?;
    }

    Ok(transaction_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
