//! # tally-db: Database Layer for Tally POS
//!
//! This crate provides database access for the Tally POS system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/transactions)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tally-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │  Repositories      │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ CashierRepository  │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepository  │  │ 001_init   │  │   │
//! │  │   │ checkout per  │    │ CustomerRepository │  │            │  │   │
//! │  │   │ request       │    │ TransactionRepo... │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (tally.db)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./tally.db")).await?;
//! let detail = db.transactions().create(draft).await?;
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cashier::CashierRepository;
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
