//! # Product Repository
//!
//! Database operations for products.
//!
//! `code` is meant to be unique per product but the schema does not enforce
//! it; two products may share a code.

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use tally_core::{NewProduct, Product};

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    unit_price: i64,
    code: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            unit_price: row.unit_price,
            code: row.code,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let products = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, unit_price, code FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Inserts a product and returns it with its generated id.
    pub async fn create(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(code = %product.code, "Creating product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, unit_price, code)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, unit_price, code
            "#,
        )
        .bind(&product.name)
        .bind(product.unit_price.amount())
        .bind(&product.code)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use tally_core::{Money, NewProduct};

    fn product(name: &str, price: i64, code: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            unit_price: Money::new(price),
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let created = repo.create(&product("Teh Botol", 5000, "TB-01")).await.unwrap();
        assert_eq!(created.name, "Teh Botol");
        assert_eq!(created.unit_price, 5000);

        assert_eq!(repo.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_not_enforced() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.create(&product("A", 100, "SAME")).await.unwrap();
        repo.create(&product("B", 200, "SAME")).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
