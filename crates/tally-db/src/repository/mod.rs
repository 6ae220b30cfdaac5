//! # Repository Module
//!
//! Database repository implementations for Tally POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().create(&draft)                              │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── create(&self, draft)      ← scoped transaction, commit/rollback   │
//! │  ├── list(&self)                                                       │
//! │  └── get_detail(&self, id)                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CashierRepository`](cashier::CashierRepository) - Cashier list/create
//! - [`ProductRepository`](product::ProductRepository) - Product list/create
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer list, phone lookup-or-insert
//! - [`TransactionRepository`](transaction::TransactionRepository) - The transactional writer and joined reads

pub mod cashier;
pub mod customer;
pub mod product;
pub mod transaction;
