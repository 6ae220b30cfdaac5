//! # Cashier Repository

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use tally_core::{Cashier, NewCashier};

#[derive(Debug, FromRow)]
struct CashierRow {
    id: i64,
    name: String,
}

impl From<CashierRow> for Cashier {
    fn from(row: CashierRow) -> Self {
        Cashier {
            id: row.id,
            name: row.name,
        }
    }
}

/// Repository for cashier database operations.
#[derive(Debug, Clone)]
pub struct CashierRepository {
    pool: SqlitePool,
}

impl CashierRepository {
    /// Creates a new CashierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashierRepository { pool }
    }

    /// Lists all cashiers ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Cashier>> {
        let rows = sqlx::query_as::<_, CashierRow>("SELECT id, name FROM cashiers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Cashier::from).collect())
    }

    /// Inserts a cashier and returns it with its generated id.
    pub async fn create(&self, cashier: &NewCashier) -> DbResult<Cashier> {
        debug!(name = %cashier.name, "Creating cashier");

        let row = sqlx::query_as::<_, CashierRow>(
            "INSERT INTO cashiers (name) VALUES (?1) RETURNING id, name",
        )
        .bind(&cashier.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
