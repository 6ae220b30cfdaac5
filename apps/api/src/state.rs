//! Shared application state.

use tally_db::Database;

/// State handed to every handler.
///
/// `Database` is a pool handle; cloning it per request shares the pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
