//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Error Propagation                                │
//! │                                                                         │
//! │  sqlx::Error ──► DbError (this file) ──► ApiError (tally-api)          │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────────────────────┐   │
//! │  │ Constraint errors    │   │ Transient errors                     │   │
//! │  │ UniqueViolation      │   │ ConnectionFailed                     │   │
//! │  │ ForeignKeyViolation  │   │ PoolExhausted                        │   │
//! │  │ ConstraintViolation  │   │ TransactionFailed                    │   │
//! │  │                      │   │ Busy                                 │   │
//! │  └──────────────────────┘   └──────────────────────────────────────┘   │
//! │           │                              │                              │
//! │           └──────────┬───────────────────┘                              │
//! │                      ▼                                                  │
//! │     write rolled back, surfaced as a generic 500                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a second customer with the same phone
    #[error("Unique constraint violated: {message}")]
    UniqueViolation { message: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing a non-existent cashier_id
    /// - Referencing a non-existent product_id
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// NOT NULL or CHECK constraint violation.
    #[error("Constraint violated: {message}")]
    ConstraintViolation { message: String },

    /// Database connection failed or was lost.
    ///
    /// ## When This Occurs
    /// - Database file can't be opened or created
    /// - I/O error mid-statement
    /// - Pool already closed during shutdown
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin/commit/rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// SQLite reported the database busy or locked past the busy timeout.
    #[error("Database busy: {0}")]
    Busy(String),

    /// Pool exhausted (no connection freed before the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// True for integrity failures reported by the schema.
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation { .. }
                | DbError::ForeignKeyViolation { .. }
                | DbError::ConstraintViolation { .. }
        )
    }

    /// True for failures where retrying the whole call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionFailed(_)
                | DbError::Busy(_)
                | DbError::PoolExhausted
                | DbError::TransactionFailed(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → SQLITE_BUSY/LOCKED → DbError::Busy,
///                                otherwise classified by ErrorKind
/// sqlx::Error::Io             → DbError::ConnectionFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                if is_busy_code(db_err.code().as_deref()) {
                    return DbError::Busy(message);
                }
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation { message },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                        DbError::ConstraintViolation { message }
                    }
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::WorkerCrashed => {
                DbError::ConnectionFailed("Database worker crashed".to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including their extended codes,
/// which keep the primary code in the low byte.
fn is_busy_code(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| matches!(c & 0xff, 5 | 6))
        .unwrap_or(false)
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
