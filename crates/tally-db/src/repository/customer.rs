//! # Customer Repository
//!
//! Customers are only ever created as a side effect of recording a
//! transaction with a phone number.
//!
//! ## Lookup-or-Insert by Phone
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve_by_phone(name, phone)   (inside the caller's transaction)     │
//! │                                                                         │
//! │  SELECT id WHERE phone = ?  ──► found ──► reuse id (name not updated)  │
//! │       │                                                                 │
//! │       ▼ not found                                                       │
//! │  INSERT ... ON CONFLICT DO NOTHING RETURNING id                         │
//! │       │                                                                 │
//! │       ├── row returned ──► new id                                      │
//! │       │                                                                 │
//! │       └── nothing returned (a concurrent writer won the unique index)  │
//! │                 ──► SELECT id WHERE phone = ?  ──► winner's id          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use tally_core::Customer;

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    phone: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            phone: row.phone,
        }
    }
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, phone FROM customers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

/// Returns the id of the customer with `phone`, inserting `{name, phone}`
/// first if there is none.
///
/// Runs on the caller's connection so it joins the caller's transaction.
/// An existing customer's name is left as it was.
pub(crate) async fn resolve_by_phone(
    conn: &mut SqliteConnection,
    name: &str,
    phone: &str,
) -> DbResult<i64> {
    if let Some(id) = select_id_by_phone(conn, phone).await? {
        debug!(customer_id = id, "Reusing customer for phone");
        return Ok(id);
    }

    let inserted: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO customers (name, phone)
        VALUES (?1, ?2)
        ON CONFLICT DO NOTHING
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(phone)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(id) => {
            debug!(customer_id = id, "Created customer");
            Ok(id)
        }
        None => {
            debug!("Customer inserted concurrently, re-reading");
            let id = sqlx::query_scalar("SELECT id FROM customers WHERE phone = ?1")
                .bind(phone)
                .fetch_one(&mut *conn)
                .await?;
            Ok(id)
        }
    }
}

async fn select_id_by_phone(conn: &mut SqliteConnection, phone: &str) -> DbResult<Option<i64>> {
    let id = sqlx::query_scalar("SELECT id FROM customers WHERE phone = ?1")
        .bind(phone)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(id)
}
